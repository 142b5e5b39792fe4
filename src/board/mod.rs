//! Board model for the move-and-block game.
//!
//! The grid is the source of truth; player positions, the empty-cell count and
//! the Zobrist hash are denormalized copies kept in sync by every mutation.

mod grid;
mod text;
mod types;

pub use grid::{Board, BoardKey, Undo};
pub use text::BoardParseError;
pub use types::{Action, Cell, ParsePosError, Player, Pos};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 16;

/// How the two tokens are placed on a fresh board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Player one at (0,0), player two at the opposite corner.
    #[default]
    Corners,
    /// Two distinct cells drawn uniformly at random.
    Random,
}

impl FromStr for Placement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "corners" | "fixed" => Ok(Placement::Corners),
            "random" => Ok(Placement::Random),
            other => Err(ConfigError::UnknownPlacement(other.to_string())),
        }
    }
}
