use crate::board::{Board, Player};
use crate::movegen::relocation_count;

pub const MOBILITY_WEIGHT: f64 = 5.0;
pub const CONTROL_WEIGHT: f64 = 3.0;
pub const CLOSENESS_WEIGHT: f64 = 2.0;
const CLOSENESS_BIAS: f64 = 0.1;

/// Own relocations minus the opponent's.
pub fn mobility(board: &Board, player: Player) -> i32 {
    relocation_count(board, player) as i32 - relocation_count(board, player.opponent()) as i32
}

/// Inverse of the size-normalized Manhattan distance between the two tokens.
pub fn closeness(board: &Board) -> f64 {
    let d = board.position(Player::One).manhattan(board.position(Player::Two)) as f64;
    let distance = d / (2 * board.size()) as f64;
    1.0 / (distance + CLOSENESS_BIAS)
}

/// Static score of `board` from `player`'s point of view; higher is better.
pub fn score(board: &Board, player: Player) -> f64 {
    MOBILITY_WEIGHT * mobility(board, player) as f64
        + CONTROL_WEIGHT * board.empty_count() as f64
        + CLOSENESS_WEIGHT * closeness(board)
}
