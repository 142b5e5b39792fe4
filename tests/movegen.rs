use isobot::board::{Action, Board, Cell, Placement, Player, Pos};
use isobot::movegen::{legal_blocks, legal_full_moves, legal_relocations};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A position reached by random play from a random start.
fn random_position(seed: u64, size: usize, plies: usize) -> (Board, Player) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(size, Placement::Random, &mut rng).unwrap();
    let mut mover = Player::One;
    for _ in 0..plies {
        let moves = legal_full_moves(&board, mover);
        let Some(&m) = moves.choose(&mut rng) else { break };
        assert!(board.apply_full_move(mover, m));
        mover = mover.opponent();
    }
    (board, mover)
}

#[test]
fn corner_start_on_four_by_four() {
    let b = Board::corners(4).unwrap();
    let r = legal_relocations(&b, Player::One);
    assert_eq!(r, vec![Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]);
}

#[test]
fn relocate_then_block_origin() {
    let mut b = Board::corners(4).unwrap();
    assert!(b.apply_relocation(Player::One, Pos::new(1, 1)));
    assert!(b.apply_block(Pos::new(0, 0)));
    assert_eq!(b.get(Pos::new(0, 0)), Some(Cell::Blocked));
    assert_eq!(b.get(Pos::new(1, 1)), Some(Cell::Owned(Player::One)));
    assert!(!b.is_empty_at(Pos::new(0, 0)));
    assert_eq!(b.position(Player::One), Pos::new(1, 1));
}

#[test]
fn illegal_inputs_are_rejected_without_change() {
    let mut b = Board::corners(4).unwrap();
    let before = b.clone();
    assert!(!b.apply_relocation(Player::One, Pos::new(2, 2)), "not adjacent");
    assert!(!b.apply_relocation(Player::One, Pos::new(0, 0)), "own cell");
    assert!(!b.apply_block(Pos::new(3, 3)), "occupied");
    assert!(!b.apply_block(Pos::new(4, 0)), "out of bounds");
    assert_eq!(b, before);
    assert!(b.apply_block(Pos::new(2, 2)));
    assert!(!b.apply_block(Pos::new(2, 2)), "already blocked");
    assert!(!b.apply_relocation(Player::Two, Pos::new(2, 2)), "blocked target");
}

#[test]
fn boxed_in_player_loses() {
    let b: Board = "....2/...../.###./.#1#./.###.".parse().unwrap();
    assert!(legal_relocations(&b, Player::One).is_empty());
    assert!(legal_full_moves(&b, Player::One).is_empty());
    assert!(!legal_relocations(&b, Player::Two).is_empty());
}

#[test]
fn relocations_are_empty_neighbours() {
    for seed in 0..60u64 {
        let (b, _) = random_position(seed, 3 + (seed as usize % 4), seed as usize % 9);
        for p in Player::BOTH {
            let from = b.position(p);
            for r in legal_relocations(&b, p) {
                assert!(from.is_adjacent(r), "seed {seed}: {r} not adjacent to {from}");
                assert_eq!(b.get(r), Some(Cell::Empty));
            }
        }
    }
}

#[test]
fn full_moves_exist_iff_relocations_exist() {
    for seed in 0..80u64 {
        let (b, mover) = random_position(seed, 2 + (seed as usize % 5), seed as usize % 12);
        let relocations = legal_relocations(&b, mover);
        let full = legal_full_moves(&b, mover);
        assert_eq!(full.is_empty(), relocations.is_empty(), "seed {seed}");
        // Each relocation pairs with exactly as many blocks as there are empty cells.
        if !relocations.is_empty() {
            assert_eq!(full.len(), relocations.len() * legal_blocks(&b).len(), "seed {seed}");
        }
        for a in &full {
            assert!(relocations.contains(&a.relocation));
            assert_ne!(a.block, a.relocation);
        }
    }
}

#[test]
fn full_move_generation_is_deterministic() {
    let (b, mover) = random_position(11, 6, 5);
    let first: Vec<Action> = legal_full_moves(&b, mover);
    let second: Vec<Action> = legal_full_moves(&b, mover);
    assert_eq!(first, second);
}

#[test]
fn blocked_set_only_grows() {
    for seed in 0..20u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut b = Board::new(5, Placement::Random, &mut rng).unwrap();
        let mut mover = Player::One;
        let mut n = 0;
        loop {
            let moves = legal_full_moves(&b, mover);
            let Some(&m) = moves.choose(&mut rng) else { break };
            let before: Vec<Pos> = b.blocked_positions().collect();
            assert!(b.apply_full_move(mover, m));
            n += 1;
            let after: Vec<Pos> = b.blocked_positions().collect();
            assert_eq!(after.len(), n);
            assert!(before.iter().all(|p| after.contains(p)));
            mover = mover.opponent();
        }
        assert!(n <= 5 * 5 - 2);
    }
}
