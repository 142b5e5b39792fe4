//! Batch strategy evaluation: many headless games between two strategies,
//! swapping who moves first every game.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Placement, Player};
use crate::error::ConfigError;
use crate::game::{Game, GameConfig, GameError, Headless};
use crate::search::SearchParams;
use crate::strategy::{Strategy, StrategyKind};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArenaParams {
    pub first: StrategyKind,
    pub second: StrategyKind,
    pub games: usize,
    pub size: usize,
    pub placement: Placement,
    pub depth: u32,
    pub seed: u64,
}

impl Default for ArenaParams {
    fn default() -> Self {
        Self {
            first: StrategyKind::Minimax,
            second: StrategyKind::Random,
            games: 10,
            size: 4,
            placement: Placement::Corners,
            depth: 3,
            seed: 42,
        }
    }
}

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("interactive strategy '{0}' cannot take part in batch evaluation")]
    Interactive(StrategyKind),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("game {index}: {source}")]
    Game { index: usize, source: GameError },
}

/// Which of the two strategies is better.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    First,
    Second,
    Tie,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub index: usize,
    /// Seat taken by the first strategy in this game.
    pub first_as: Player,
    pub winner: Player,
    pub first_won: bool,
    pub plies: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArenaReport {
    pub params: ArenaParams,
    pub first_wins: usize,
    pub second_wins: usize,
    pub verdict: Verdict,
    pub games: Vec<GameSummary>,
}

fn game_seed(base: u64, index: usize, salt: u64) -> u64 {
    base ^ (index as u64).wrapping_mul(0x9E3779B97F4A7C15) ^ salt
}

/// The first strategy sits as player one in even games and player two in odd ones.
pub fn seat_of_first(index: usize) -> Player {
    if index % 2 == 0 { Player::One } else { Player::Two }
}

fn play_one(params: &ArenaParams, index: usize) -> Result<GameSummary, ArenaError> {
    let search = SearchParams { depth: params.depth, ..Default::default() };
    let first = Strategy::new(params.first, search, game_seed(params.seed, index, 1))?;
    let second = Strategy::new(params.second, search, game_seed(params.seed, index, 2))?;
    let first_as = seat_of_first(index);
    let (p1, p2) = if first_as == Player::One { (first, second) } else { (second, first) };
    let config = GameConfig { size: params.size, placement: params.placement, seed: game_seed(params.seed, index, 0) };
    let record = Game::new(&config, p1, p2)?
        .play(&mut Headless)
        .map_err(|source| ArenaError::Game { index, source })?;
    Ok(GameSummary {
        index,
        first_as,
        winner: record.winner,
        first_won: record.winner == first_as,
        plies: record.plies(),
    })
}

/// Play `params.games` games in parallel. `on_game` fires once per finished game.
pub fn evaluate_strategies<F>(params: &ArenaParams, on_game: F) -> Result<ArenaReport, ArenaError>
where
    F: Fn(&GameSummary) + Sync,
{
    for kind in [params.first, params.second] {
        if kind == StrategyKind::Human {
            return Err(ArenaError::Interactive(kind));
        }
    }
    let games: Vec<GameSummary> = (0..params.games)
        .into_par_iter()
        .map(|i| -> Result<GameSummary, ArenaError> {
            let s = play_one(params, i)?;
            on_game(&s);
            Ok(s)
        })
        .collect::<Result<_, ArenaError>>()?;

    let first_wins = games.iter().filter(|g| g.first_won).count();
    let second_wins = games.len() - first_wins;
    let verdict = match first_wins.cmp(&second_wins) {
        std::cmp::Ordering::Greater => Verdict::First,
        std::cmp::Ordering::Less => Verdict::Second,
        std::cmp::Ordering::Equal => Verdict::Tie,
    };
    info!(
        "{} (first) wins {} / {} (second) wins {} over {} games",
        params.first, first_wins, params.second, second_wins, games.len()
    );
    Ok(ArenaReport { params: params.clone(), first_wins, second_wins, verdict, games })
}
