//! Plain minimax without pruning, ordering or caching. Every node works on its
//! own board copy. Slow by construction; it is the yardstick the alpha-beta
//! searcher is checked against.

use crate::board::{Action, Board, Player};
use crate::movegen::{legal_full_moves, legal_relocations};
use crate::search::alphabeta::SearchError;
use crate::search::eval;

#[derive(Debug, Clone, PartialEq)]
pub struct MinimaxResult {
    pub best: Option<Action>,
    pub score: f64,
    pub nodes: u64,
}

pub fn minimax(board: &Board, root: Player, depth: u32) -> Result<MinimaxResult, SearchError> {
    let mut nodes = 0u64;
    let (score, best) = visit(board, root, depth, true, &mut nodes)?;
    Ok(MinimaxResult { best, score, nodes })
}

fn visit(
    board: &Board,
    root: Player,
    depth: u32,
    maximizing: bool,
    nodes: &mut u64,
) -> Result<(f64, Option<Action>), SearchError> {
    *nodes += 1;
    let mover = if maximizing { root } else { root.opponent() };
    let relocations = legal_relocations(board, mover);
    if depth == 0 || relocations.is_empty() {
        return Ok((eval::score(board, root), None));
    }
    let moves = legal_full_moves(board, mover);
    if moves.is_empty() {
        return Err(SearchError::EmptyExpansion {
            player: mover,
            relocations: relocations.len(),
            static_score: eval::score(board, root),
        });
    }
    let mut best = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
    let mut best_move = None;
    for m in moves {
        let mut child = board.clone();
        child.apply_full_move(mover, m);
        let (score, _) = visit(&child, root, depth - 1, !maximizing, nodes)?;
        let better = if maximizing { score > best } else { score < best };
        if better {
            best = score;
            best_move = Some(m);
        }
    }
    Ok((best, best_move))
}
