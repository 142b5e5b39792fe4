use thiserror::Error;

/// Caller mistakes detected while setting up a board, strategy or game.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown strategy '{0}' (expected human, random or minimax)")]
    UnknownStrategy(String),

    #[error("unknown placement '{0}' (expected corners or random)")]
    UnknownPlacement(String),

    #[error("board size {size} out of range {min}..={max}")]
    BoardSize { size: usize, min: usize, max: usize },

    #[error("search depth must be at least 1")]
    ZeroDepth,
}
