use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::board::{Action, Board, Player};
use crate::error::ConfigError;
use crate::movegen::legal_full_moves;
use crate::search::{SearchError, SearchParams, Searcher};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Human,
    Random,
    Minimax,
}

impl StrategyKind {
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Human => "human",
            StrategyKind::Random => "random",
            StrategyKind::Minimax => "minimax",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" => Ok(StrategyKind::Human),
            "random" => Ok(StrategyKind::Random),
            "minimax" | "search" | "alphabeta" => Ok(StrategyKind::Minimax),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

/// A player's decision procedure.
pub enum Strategy {
    /// Moves come from outside (terminal input); `choose_move` never proposes one.
    Human,
    Random { rng: SmallRng },
    Search { searcher: Searcher },
}

impl Strategy {
    pub fn new(kind: StrategyKind, params: SearchParams, seed: u64) -> Result<Self, ConfigError> {
        Ok(match kind {
            StrategyKind::Human => Strategy::Human,
            StrategyKind::Random => Strategy::Random { rng: SmallRng::seed_from_u64(seed) },
            StrategyKind::Minimax => {
                if params.depth == 0 { return Err(ConfigError::ZeroDepth); }
                Strategy::Search { searcher: Searcher::new(params) }
            }
        })
    }

    /// Build from a user-facing name; unknown names fail before any game exists.
    pub fn from_name(name: &str, params: SearchParams, seed: u64) -> Result<Self, ConfigError> {
        Self::new(name.parse()?, params, seed)
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Human => StrategyKind::Human,
            Strategy::Random { .. } => StrategyKind::Random,
            Strategy::Search { .. } => StrategyKind::Minimax,
        }
    }

    pub fn is_interactive(&self) -> bool { matches!(self, Strategy::Human) }

    pub fn new_game(&mut self) {
        if let Strategy::Search { searcher } = self { searcher.new_game(); }
    }

    /// The action to play, or None when `player` has no legal full move
    /// (always None for `Human`).
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Result<Option<Action>, SearchError> {
        match self {
            Strategy::Human => Ok(None),
            Strategy::Random { rng } => Ok(legal_full_moves(board, player).choose(rng).copied()),
            Strategy::Search { searcher } => Ok(searcher.search(board, player)?.best),
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Search { searcher } => write!(f, "Search(depth={})", searcher.params().depth),
            other => write!(f, "{}", other.kind()),
        }
    }
}
