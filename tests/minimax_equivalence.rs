use isobot::board::{Board, Placement, Player};
use isobot::movegen::legal_full_moves;
use isobot::search::reference::minimax;
use isobot::search::{SearchParams, Searcher};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn random_position(seed: u64, size: usize, plies: usize) -> (Board, Player) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(size, Placement::Random, &mut rng).unwrap();
    let mut mover = Player::One;
    for _ in 0..plies {
        let moves = legal_full_moves(&board, mover);
        let Some(&m) = moves.choose(&mut rng) else { break };
        board.apply_full_move(mover, m);
        mover = mover.opponent();
    }
    (board, mover)
}

fn cases() -> Vec<(Board, Player, u32)> {
    let mut out = Vec::new();
    for seed in 0..12u64 {
        out.push({
            let (b, p) = random_position(seed, 3, (seed % 4) as usize);
            (b, p, 3)
        });
        out.push({
            let (b, p) = random_position(seed + 100, 4, 2 + (seed % 5) as usize);
            (b, p, 2)
        });
    }
    out
}

#[test]
fn alphabeta_value_equals_minimax() {
    for (b, p, depth) in cases() {
        let reference = minimax(&b, p, depth).unwrap();
        for order_moves in [false, true] {
            for use_cache in [false, true] {
                let params = SearchParams { depth, order_moves, use_cache, ..Default::default() };
                let r = Searcher::new(params).search(&b, p).unwrap();
                assert_eq!(
                    r.score, reference.score,
                    "value differs on {} for {p} (order={order_moves}, cache={use_cache})",
                    b.to_code()
                );
            }
        }
    }
}

#[test]
fn unordered_alphabeta_picks_the_same_move() {
    for (b, p, depth) in cases() {
        let reference = minimax(&b, p, depth).unwrap();
        let params = SearchParams { depth, order_moves: false, use_cache: false, ..Default::default() };
        let r = Searcher::new(params).search(&b, p).unwrap();
        assert_eq!(r.best, reference.best, "move differs on {}", b.to_code());
    }
}

#[test]
fn pruning_never_visits_more_nodes() {
    for (b, p, depth) in cases() {
        let reference = minimax(&b, p, depth).unwrap();
        let params = SearchParams { depth, order_moves: false, use_cache: false, ..Default::default() };
        let r = Searcher::new(params).search(&b, p).unwrap();
        assert!(r.nodes <= reference.nodes, "{} > {} on {}", r.nodes, reference.nodes, b.to_code());
    }
}

#[test]
fn search_is_reproducible() {
    let (b, p) = random_position(7, 5, 3);
    let params = SearchParams { depth: 2, ..Default::default() };
    let first = Searcher::new(params).search(&b, p).unwrap();
    let second = Searcher::new(params).search(&b, p).unwrap();
    assert_eq!(first.best, second.best);
    assert_eq!(first.score, second.score);
    assert_eq!(first.nodes, second.nodes);
}
