// Full-move tree counting. `perft` uses make/unmake on one board, `perft_copy`
// clones per node; both must always agree.
use crate::board::{Board, Player};
use crate::movegen::{legal_full_moves, legal_full_moves_in_place, legal_relocations};

/// Number of full-move sequences of length `depth` starting with `mover` to play.
pub fn perft(board: &mut Board, mover: Player, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let relocations = legal_relocations(board, mover);
    let moves = legal_full_moves_in_place(board, mover, &relocations);
    if depth == 1 { return moves.len() as u64; }
    let mut nodes = 0u64;
    for m in moves {
        let undo = board.make(mover, m);
        nodes += perft(board, mover.opponent(), depth - 1);
        board.unmake(undo);
    }
    nodes
}

pub fn perft_copy(board: &Board, mover: Player, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut nodes = 0u64;
    for m in legal_full_moves(board, mover) {
        let mut child = board.clone();
        child.apply_full_move(mover, m);
        nodes += perft_copy(&child, mover.opponent(), depth - 1);
    }
    nodes
}
