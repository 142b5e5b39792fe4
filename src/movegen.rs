//! Legal move generation. All functions are read-only with respect to the
//! caller's board and return freshly built vectors in a fixed order.

use crate::board::{Action, Board, Player, Pos};

/// King-move offsets in generation order.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Empty in-bounds neighbours of `player`'s token. Empty result means `player` has lost.
pub fn legal_relocations(board: &Board, player: Player) -> Vec<Pos> {
    let from = board.position(player);
    DIRECTIONS
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc, board.size()))
        .filter(|&p| board.is_empty_at(p))
        .collect()
}

/// Mobility without allocating.
pub fn relocation_count(board: &Board, player: Player) -> usize {
    let from = board.position(player);
    DIRECTIONS
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc, board.size()))
        .filter(|&p| board.is_empty_at(p))
        .count()
}

/// Every empty cell, row-major.
pub fn legal_blocks(board: &Board) -> Vec<Pos> {
    let size = board.size();
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_empty())
        .map(|(i, _)| Pos::new(i / size, i % size))
        .collect()
}

/// All relocation + block pairs for `player`. Blocks are taken from the board
/// after each relocation, so the vacated origin is eligible and the destination is not.
pub fn legal_full_moves(board: &Board, player: Player) -> Vec<Action> {
    let relocations = legal_relocations(board, player);
    if relocations.is_empty() {
        return Vec::new();
    }
    let mut scratch = board.clone();
    legal_full_moves_in_place(&mut scratch, player, &relocations)
}

/// Same enumeration on a board the caller owns; every hypothesis is reverted before returning.
pub(crate) fn legal_full_moves_in_place(board: &mut Board, player: Player, relocations: &[Pos]) -> Vec<Action> {
    let mut out = Vec::with_capacity(relocations.len() * board.empty_count());
    for &to in relocations {
        let from = board.relocate_unchecked(player, to);
        out.extend(legal_blocks(board).into_iter().map(|block| Action::new(to, block)));
        board.unrelocate(player, from);
    }
    out
}

/// True when `action` is a legal full move for `player`.
pub fn is_legal(board: &Board, player: Player, action: Action) -> bool {
    board.is_legal(player, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn corner_start_relocations() {
        let b = Board::corners(4).unwrap();
        let r = legal_relocations(&b, Player::One);
        assert_eq!(r, vec![Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]);
        assert_eq!(relocation_count(&b, Player::Two), 3);
    }

    #[test]
    fn full_moves_swap_origin_for_destination() {
        let b = Board::corners(4).unwrap();
        let moves = legal_full_moves(&b, Player::One);
        assert_eq!(moves.len(), 3 * 14);
        assert!(moves.contains(&Action::new(Pos::new(1, 1), Pos::new(0, 0))));
        assert!(!moves.iter().any(|m| m.block == m.relocation));
        assert!(moves.iter().all(|m| is_legal(&b, Player::One, *m)));
        // Generation leaves the caller's board alone.
        assert_eq!(b.get(Pos::new(0, 0)), Some(Cell::Owned(Player::One)));
    }

    #[test]
    fn boxed_in_player_has_no_moves() {
        let b: Board = "1#./##./..2".parse().unwrap();
        assert!(legal_relocations(&b, Player::One).is_empty());
        assert!(legal_full_moves(&b, Player::One).is_empty());
    }
}
