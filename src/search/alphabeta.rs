use crate::board::{Action, Board, Player};
use crate::movegen::{legal_full_moves_in_place, legal_relocations};
use crate::search::cache::{CacheScope, EvalCache, DEFAULT_CAPACITY};
use crate::search::eval;
use log::debug;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: u32,
    /// Sort children by their one-ply static score before recursing.
    pub order_moves: bool,
    pub use_cache: bool,
    pub cache_scope: CacheScope,
    pub cache_capacity: usize,
    pub max_nodes: Option<u64>,
    pub movetime: Option<Duration>,
    pub threads: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 3,
            order_moves: true,
            use_cache: true,
            cache_scope: CacheScope::PerDecision,
            cache_capacity: DEFAULT_CAPACITY,
            max_nodes: None,
            movetime: None,
            threads: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub best: Option<Action>,
    pub score: f64,
    pub nodes: u64,
    /// Deepest fully searched depth.
    pub depth: u32,
    pub cache_hits: u64,
    /// The node or time budget ran out before the requested depth finished.
    pub aborted: bool,
}

/// Internal inconsistencies, never a normal end of game.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    #[error("{player} has {relocations} relocations but no full move was generated (static score {static_score})")]
    EmptyExpansion { player: Player, relocations: usize, static_score: f64 },
}

/// Minimax with alpha-beta pruning. Scores are always taken from the root
/// player's perspective; the root player maximizes, the opponent minimizes.
pub struct Searcher {
    params: SearchParams,
    cache: Arc<EvalCache>,
    root: Player,
    root_depth: u32,
    nodes: u64,
    cache_hits: u64,
    node_limit: u64,
    deadline: Option<Instant>,
    stopped: bool,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(SearchParams::default()) }
}

impl Searcher {
    pub fn new(params: SearchParams) -> Self {
        Self {
            params,
            cache: Arc::new(EvalCache::with_capacity(params.cache_capacity)),
            root: Player::One,
            root_depth: 0,
            nodes: 0,
            cache_hits: 0,
            node_limit: u64::MAX,
            deadline: None,
            stopped: false,
        }
    }

    fn worker(params: SearchParams, cache: Arc<EvalCache>, root: Player, deadline: Option<Instant>) -> Self {
        Self {
            params,
            cache,
            root,
            root_depth: 0,
            nodes: 0,
            cache_hits: 0,
            node_limit: u64::MAX,
            deadline,
            stopped: false,
        }
    }

    pub fn params(&self) -> &SearchParams { &self.params }

    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn cache_len(&self) -> usize { self.cache.len() }

    /// Drop every cached score; called when a new game starts.
    pub fn new_game(&mut self) { self.cache.clear(); }

    /// Cached static score of `board` for `player`.
    pub fn evaluate(&mut self, board: &Board, player: Player) -> f64 {
        if !self.params.use_cache {
            return eval::score(board, player);
        }
        if let Some(s) = self.cache.get(board, player) {
            self.cache_hits += 1;
            return s;
        }
        let s = eval::score(board, player);
        self.cache.put(board, player, s);
        s
    }

    /// Choose a full move for `player`. `best` is None when `player` has no relocation.
    pub fn search(&mut self, board: &Board, player: Player) -> Result<SearchResult, SearchError> {
        self.root = player;
        self.nodes = 0;
        self.cache_hits = 0;
        self.stopped = false;
        self.node_limit = self.params.max_nodes.unwrap_or(u64::MAX);
        if self.params.use_cache {
            if self.params.cache_scope == CacheScope::PerDecision { self.cache.clear(); }
            self.cache.bump_generation();
        }
        let t0 = Instant::now();
        self.deadline = self.params.movetime.map(|d| t0 + d);

        let budgeted = self.deadline.is_some() || self.params.max_nodes.is_some();
        let mut res = if budgeted && self.params.depth > 1 {
            // Iterative deepening so an exhausted budget still leaves a finished shallower answer.
            let mut last: Option<SearchResult> = None;
            for d in 1..=self.params.depth {
                let r = self.search_depth(board, d)?;
                if self.stopped {
                    if last.is_none() { last = Some(r); }
                    break;
                }
                last = Some(r);
            }
            match last {
                Some(r) => r,
                None => self.search_depth(board, self.params.depth)?,
            }
        } else {
            self.search_depth(board, self.params.depth)?
        };
        res.nodes = self.nodes;
        res.cache_hits = self.cache_hits;
        res.aborted = self.stopped;
        debug!(
            "search {} depth={} score={:.3} best={} nodes={} hits={} elapsed={:?}{}",
            player,
            res.depth,
            res.score,
            res.best.map_or_else(|| "(none)".to_string(), |m| m.to_string()),
            res.nodes,
            res.cache_hits,
            t0.elapsed(),
            if res.aborted { " (aborted)" } else { "" }
        );
        Ok(res)
    }

    /// One fixed-depth pass from the root. Uses the root player set by `search`.
    fn search_depth(&mut self, board: &Board, depth: u32) -> Result<SearchResult, SearchError> {
        self.root_depth = depth;
        if self.params.threads > 1 && depth > 1 {
            return self.search_depth_parallel(board, depth);
        }
        let mut scratch = board.clone();
        let (score, best) = self.alphabeta(&mut scratch, depth, true, f64::NEG_INFINITY, f64::INFINITY)?;
        debug_assert_eq!(&scratch, board, "make/unmake left the scratch board modified");
        Ok(SearchResult { best, score, nodes: self.nodes, depth, ..Default::default() })
    }

    /// Root children searched independently with full windows; no bounds are shared.
    fn search_depth_parallel(&mut self, board: &Board, depth: u32) -> Result<SearchResult, SearchError> {
        self.nodes += 1;
        let root = self.root;
        let mut scratch = board.clone();
        let relocations = legal_relocations(&scratch, root);
        if relocations.is_empty() {
            let score = self.evaluate(&scratch, root);
            return Ok(SearchResult { best: None, score, nodes: self.nodes, depth, ..Default::default() });
        }
        let mut moves = legal_full_moves_in_place(&mut scratch, root, &relocations);
        if moves.is_empty() {
            let static_score = self.evaluate(&scratch, root);
            return Err(SearchError::EmptyExpansion { player: root, relocations: relocations.len(), static_score });
        }
        if self.params.order_moves {
            moves = self.order(&mut scratch, root, moves, true);
        }

        let params = self.params;
        let cache = self.cache.clone();
        let deadline = self.deadline;
        // Each worker gets an equal share of whatever node budget is left.
        let share = (self.node_limit.saturating_sub(self.nodes) / moves.len() as u64).max(1);
        let results: Vec<Result<(Action, f64, u64, u64, bool), SearchError>> = moves
            .par_iter()
            .map(|&m| -> Result<(Action, f64, u64, u64, bool), SearchError> {
                let mut child = board.clone();
                child.make(root, m);
                let mut w = Searcher::worker(params, cache.clone(), root, deadline);
                w.root_depth = depth;
                w.node_limit = share;
                let (score, _) = w.alphabeta(&mut child, depth - 1, false, f64::NEG_INFINITY, f64::INFINITY)?;
                Ok((m, score, w.nodes, w.cache_hits, w.stopped))
            })
            .collect();

        // Reduce in candidate order so ties resolve exactly as the sequential search does.
        let mut best: Option<(Action, f64)> = None;
        for r in results {
            let (m, s, n, h, stopped) = r?;
            self.nodes += n;
            self.cache_hits += h;
            self.stopped |= stopped;
            if best.map_or(true, |(_, bs)| s > bs) { best = Some((m, s)); }
        }
        let (bm, score) = match best {
            Some((m, s)) => (Some(m), s),
            None => (None, self.evaluate(board, root)),
        };
        Ok(SearchResult { best: bm, score, nodes: self.nodes, depth, ..Default::default() })
    }

    fn out_of_budget(&mut self) -> bool {
        if self.nodes >= self.node_limit { self.stopped = true; }
        if let Some(dl) = self.deadline { if Instant::now() >= dl { self.stopped = true; } }
        self.stopped
    }

    /// Sort by the static score after each move: best first for the maximizer,
    /// worst first for the minimizer. Stable, so ties keep generation order.
    fn order(&mut self, board: &mut Board, mover: Player, moves: Vec<Action>, maximizing: bool) -> Vec<Action> {
        let root = self.root;
        let mut scored: Vec<(f64, Action)> = moves
            .into_iter()
            .map(|m| {
                let undo = board.make(mover, m);
                let s = self.evaluate(board, root);
                board.unmake(undo);
                (s, m)
            })
            .collect();
        if maximizing {
            scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        } else {
            scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        }
        scored.into_iter().map(|(_, m)| m).collect()
    }

    /// Fail-soft: a cut node may return a value past its window, but only as a
    /// bound the parent already discards, so the root value equals plain minimax.
    fn alphabeta(
        &mut self,
        board: &mut Board,
        depth: u32,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<(f64, Option<Action>), SearchError> {
        self.nodes += 1;
        let mover = if maximizing { self.root } else { self.root.opponent() };
        if depth == 0 {
            return Ok((self.evaluate(board, self.root), None));
        }
        let relocations = legal_relocations(board, mover);
        if relocations.is_empty() {
            return Ok((self.evaluate(board, self.root), None));
        }
        // The root always expands so a budgeted search still has a move to offer.
        if depth < self.root_depth && self.out_of_budget() {
            return Ok((self.evaluate(board, self.root), None));
        }

        let mut moves = legal_full_moves_in_place(board, mover, &relocations);
        if moves.is_empty() {
            let static_score = self.evaluate(board, self.root);
            return Err(SearchError::EmptyExpansion { player: mover, relocations: relocations.len(), static_score });
        }
        if self.params.order_moves {
            moves = self.order(board, mover, moves, maximizing);
        }

        let mut best = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        let mut best_move: Option<Action> = None;
        for m in moves {
            let undo = board.make(mover, m);
            let child = self.alphabeta(board, depth - 1, !maximizing, alpha, beta);
            board.unmake(undo);
            let (score, _) = child?;
            if maximizing {
                if score > best { best = score; best_move = Some(m); }
                if best > alpha { alpha = best; }
            } else {
                if score < best { best = score; best_move = Some(m); }
                if best < beta { beta = best; }
            }
            if beta <= alpha || self.stopped { break; }
        }
        Ok((best, best_move))
    }
}
