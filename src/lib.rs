// Move-and-block (Isolation) engine: board model, move generation, alpha-beta search
pub mod arena;
pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod search;
pub mod strategy;

pub use board::{Action, Board, Cell, Placement, Player, Pos};
pub use error::ConfigError;
pub use strategy::{Strategy, StrategyKind};
