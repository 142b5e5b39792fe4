//! Turn driver: alternates players, applies their actions and detects the end.

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Action, Board, Placement, Player, Pos};
use crate::error::ConfigError;
use crate::movegen::legal_relocations;
use crate::search::SearchError;
use crate::strategy::Strategy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: usize,
    pub placement: Placement,
    /// Seeds the random start placement.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { size: 4, placement: Placement::Corners, seed: 0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Relocation,
    Block,
}

/// Everything the driver needs from a front end. Defaults make a headless one.
pub trait Frontend {
    fn on_start(&mut self, _board: &Board) {}
    fn on_move(&mut self, _board: &Board, _player: Player, _action: Action) {}
    fn on_end(&mut self, _board: &Board, _winner: Player) {}

    /// Next cell picked by a human for `phase`; None gives up the game.
    fn pick(&mut self, _board: &Board, _player: Player, _phase: Phase) -> Option<Pos> { None }

    /// The last pick was not legal; the driver will ask again.
    fn rejected(&mut self, _pos: Pos, _phase: Phase) {}
}

pub struct Headless;

impl Frontend for Headless {}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("{player} proposed illegal action {action}")]
    IllegalAction { player: Player, action: Action },

    #[error("{player} has legal relocations but its strategy returned no action")]
    NoAction { player: Player },

    #[error("{player} abandoned the game")]
    Abandoned { player: Player },

    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub winner: Player,
    /// Starting position in the compact board form.
    pub start: String,
    /// Actions in play order; player one moves first.
    pub moves: Vec<Action>,
}

impl GameRecord {
    pub fn plies(&self) -> usize { self.moves.len() }
}

pub struct Game {
    board: Board,
    start: String,
    current: Player,
    players: [Strategy; 2],
    moves: Vec<Action>,
}

impl Game {
    pub fn new(config: &GameConfig, p1: Strategy, p2: Strategy) -> Result<Self, ConfigError> {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let board = Board::new(config.size, config.placement, &mut rng)?;
        Ok(Self::from_board(board, p1, p2))
    }

    /// Start from an arbitrary position with player one to move.
    pub fn from_board(board: Board, mut p1: Strategy, mut p2: Strategy) -> Self {
        p1.new_game();
        p2.new_game();
        Self { start: board.to_code(), board, current: Player::One, players: [p1, p2], moves: Vec::new() }
    }

    pub fn board(&self) -> &Board { &self.board }

    pub fn current(&self) -> Player { self.current }

    /// The winner once the player to move is stuck.
    pub fn winner(&self) -> Option<Player> {
        if legal_relocations(&self.board, self.current).is_empty() {
            Some(self.current.opponent())
        } else {
            None
        }
    }

    /// Play one turn for the current player. Returns the winner if the game is over.
    pub fn step(&mut self, ui: &mut dyn Frontend) -> Result<Option<Player>, GameError> {
        if let Some(w) = self.winner() {
            return Ok(Some(w));
        }
        let player = self.current;
        let action = if self.players[player.index()].is_interactive() {
            self.human_turn(ui, player)?
        } else {
            let action = self.players[player.index()]
                .choose_move(&self.board, player)?
                .ok_or(GameError::NoAction { player })?;
            if !self.board.apply_full_move(player, action) {
                return Err(GameError::IllegalAction { player, action });
            }
            action
        };
        debug!("{} plays {}", player, action);
        self.moves.push(action);
        ui.on_move(&self.board, player, action);
        self.current = player.opponent();
        Ok(self.winner())
    }

    /// Relocation then block. Giving up between the two halves restores the
    /// token, so an abandoned turn leaves the board as it was.
    fn human_turn(&mut self, ui: &mut dyn Frontend, player: Player) -> Result<Action, GameError> {
        let from = self.board.position(player);
        let relocation = loop {
            let pos = ui.pick(&self.board, player, Phase::Relocation).ok_or(GameError::Abandoned { player })?;
            if self.board.apply_relocation(player, pos) { break pos; }
            ui.rejected(pos, Phase::Relocation);
        };
        let block = loop {
            let Some(pos) = ui.pick(&self.board, player, Phase::Block) else {
                self.board.unrelocate(player, from);
                return Err(GameError::Abandoned { player });
            };
            if self.board.apply_block(pos) { break pos; }
            ui.rejected(pos, Phase::Block);
        };
        Ok(Action::new(relocation, block))
    }

    /// Run to completion.
    pub fn play(mut self, ui: &mut dyn Frontend) -> Result<GameRecord, GameError> {
        ui.on_start(&self.board);
        let winner = loop {
            match self.step(ui) {
                Ok(Some(w)) => break w,
                Ok(None) => {}
                Err(e) => {
                    warn!("game stopped after {} plies: {}", self.moves.len(), e);
                    return Err(e);
                }
            }
        };
        ui.on_end(&self.board, winner);
        info!("{} wins after {} plies", winner, self.moves.len());
        Ok(GameRecord { winner, start: self.start, moves: self.moves })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchParams;
    use crate::strategy::StrategyKind;

    fn random(seed: u64) -> Strategy {
        Strategy::new(StrategyKind::Random, SearchParams::default(), seed).unwrap()
    }

    #[test]
    fn random_game_blocks_one_cell_per_ply() {
        let game = Game::new(&GameConfig::default(), random(1), random(2)).unwrap();
        let rec = game.play(&mut Headless).unwrap();
        let mut board: Board = rec.start.parse().unwrap();
        let mut mover = Player::One;
        for (i, &a) in rec.moves.iter().enumerate() {
            let before: Vec<Pos> = board.blocked_positions().collect();
            assert!(board.apply_full_move(mover, a));
            let after: Vec<Pos> = board.blocked_positions().collect();
            assert_eq!(after.len(), i + 1);
            assert!(before.iter().all(|p| after.contains(p)));
            mover = mover.opponent();
        }
        // The side to move at the end is stuck and lost.
        assert!(legal_relocations(&board, mover).is_empty());
        assert_eq!(rec.winner, mover.opponent());
    }

    #[test]
    fn stuck_player_to_move_loses_immediately() {
        let b: Board = "1#./##./..2".parse().unwrap();
        let rec = Game::from_board(b, random(0), random(0)).play(&mut Headless).unwrap();
        assert_eq!(rec.winner, Player::Two);
        assert!(rec.moves.is_empty());
    }

    #[test]
    fn headless_human_abandons() {
        let human = Strategy::new(StrategyKind::Human, SearchParams::default(), 0).unwrap();
        let game = Game::new(&GameConfig::default(), human, random(0)).unwrap();
        assert!(matches!(game.play(&mut Headless), Err(GameError::Abandoned { player: Player::One })));
    }
}
