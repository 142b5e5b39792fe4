use rand::Rng;

use super::types::{Action, Cell, Player, Pos};
use super::{Placement, MAX_SIZE, MIN_SIZE};
use crate::error::ConfigError;
use crate::search::zobrist;

/// Exact board contents, one code per cell. Used as the cache equality key.
pub type BoardKey = Box<[u8]>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    positions: [Pos; 2],
    empty: usize,
    hash: u64,
}

/// Everything needed to revert one `make`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Undo {
    player: Player,
    from: Pos,
    action: Action,
}

pub(crate) fn check_size(size: usize) -> Result<(), ConfigError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(ConfigError::BoardSize { size, min: MIN_SIZE, max: MAX_SIZE })
    }
}

impl Board {
    /// Fresh board with both tokens placed according to `placement`.
    pub fn new<R: Rng>(size: usize, placement: Placement, rng: &mut R) -> Result<Self, ConfigError> {
        check_size(size)?;
        let (p1, p2) = match placement {
            Placement::Corners => (Pos::new(0, 0), Pos::new(size - 1, size - 1)),
            Placement::Random => {
                let cells = size * size;
                let a = rng.gen_range(0..cells);
                // Draw from the remaining cells so the two starts are distinct.
                let mut b = rng.gen_range(0..cells - 1);
                if b >= a { b += 1; }
                (Pos::new(a / size, a % size), Pos::new(b / size, b % size))
            }
        };
        Ok(Self::with_players(size, p1, p2))
    }

    /// Corner start, no randomness involved.
    pub fn corners(size: usize) -> Result<Self, ConfigError> {
        check_size(size)?;
        Ok(Self::with_players(size, Pos::new(0, 0), Pos::new(size - 1, size - 1)))
    }

    fn with_players(size: usize, p1: Pos, p2: Pos) -> Self {
        let mut board = Self {
            size,
            cells: vec![Cell::Empty; size * size],
            positions: [p1, p2],
            empty: size * size,
            hash: 0,
        };
        board.set(p1, Cell::Owned(Player::One));
        board.set(p2, Cell::Owned(Player::Two));
        board
    }

    /// Assemble from a validated cell vector. Positions are recovered from the grid.
    pub(crate) fn from_parts(size: usize, cells: Vec<Cell>, positions: [Pos; 2]) -> Self {
        let empty = cells.iter().filter(|c| c.is_empty()).count();
        let mut board = Self { size, cells, positions, empty, hash: 0 };
        board.hash = zobrist::compute(&board);
        board
    }

    pub fn size(&self) -> usize { self.size }

    pub fn cells(&self) -> &[Cell] { &self.cells }

    pub fn in_bounds(&self, pos: Pos) -> bool { pos.row < self.size && pos.col < self.size }

    fn idx(&self, pos: Pos) -> usize { pos.row * self.size + pos.col }

    /// Cell at `pos`, or None when out of bounds.
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        if self.in_bounds(pos) { Some(self.cells[self.idx(pos)]) } else { None }
    }

    pub fn is_empty_at(&self, pos: Pos) -> bool {
        self.get(pos) == Some(Cell::Empty)
    }

    pub fn position(&self, player: Player) -> Pos { self.positions[player.index()] }

    /// Number of `Empty` cells, i.e. the number of legal blocks.
    pub fn empty_count(&self) -> usize { self.empty }

    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Blocked).count()
    }

    pub fn blocked_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Blocked)
            .map(move |(i, _)| Pos::new(i / self.size, i % self.size))
    }

    /// Incrementally maintained Zobrist hash of the grid.
    pub fn hash(&self) -> u64 { self.hash }

    pub fn key(&self) -> BoardKey {
        self.cells.iter().map(|c| c.code()).collect()
    }

    fn set(&mut self, pos: Pos, cell: Cell) {
        let idx = self.idx(pos);
        let old = self.cells[idx];
        if old == cell { return; }
        self.hash ^= zobrist::cell_key(idx, old) ^ zobrist::cell_key(idx, cell);
        if old.is_empty() { self.empty -= 1; }
        if cell.is_empty() { self.empty += 1; }
        self.cells[idx] = cell;
    }

    /// Move `player` to `target` if it is an empty neighbour. Returns false and
    /// leaves the board untouched otherwise.
    pub fn apply_relocation(&mut self, player: Player, target: Pos) -> bool {
        let from = self.position(player);
        if !from.is_adjacent(target) || !self.is_empty_at(target) {
            return false;
        }
        self.set(from, Cell::Empty);
        self.set(target, Cell::Owned(player));
        self.positions[player.index()] = target;
        true
    }

    /// Block `target` if it is in bounds and empty.
    pub fn apply_block(&mut self, target: Pos) -> bool {
        if !self.is_empty_at(target) {
            return false;
        }
        self.set(target, Cell::Blocked);
        true
    }

    /// Whether `action` is a legal full move for `player` on this board.
    pub fn is_legal(&self, player: Player, action: Action) -> bool {
        let from = self.position(player);
        if !from.is_adjacent(action.relocation) || !self.is_empty_at(action.relocation) {
            return false;
        }
        action.block != action.relocation && (action.block == from || self.is_empty_at(action.block))
    }

    /// Relocate and block as one step. Nothing changes unless both halves are legal.
    pub fn apply_full_move(&mut self, player: Player, action: Action) -> bool {
        if !self.is_legal(player, action) {
            return false;
        }
        self.make(player, action);
        true
    }

    /// Apply a full move the caller already knows to be legal; revert with [`Board::unmake`].
    pub fn make(&mut self, player: Player, action: Action) -> Undo {
        debug_assert!(self.is_legal(player, action), "illegal make {action} for {player}");
        let from = self.position(player);
        self.set(from, Cell::Empty);
        self.set(action.relocation, Cell::Owned(player));
        self.positions[player.index()] = action.relocation;
        self.set(action.block, Cell::Blocked);
        Undo { player, from, action }
    }

    /// Restore the exact state prior to the matching `make`.
    pub fn unmake(&mut self, undo: Undo) {
        self.set(undo.action.block, Cell::Empty);
        self.set(undo.action.relocation, Cell::Empty);
        self.set(undo.from, Cell::Owned(undo.player));
        self.positions[undo.player.index()] = undo.from;
    }

    /// Relocation only, for enumerating blocks. Reverted with `unrelocate`.
    pub(crate) fn relocate_unchecked(&mut self, player: Player, to: Pos) -> Pos {
        let from = self.position(player);
        self.set(from, Cell::Empty);
        self.set(to, Cell::Owned(player));
        self.positions[player.index()] = to;
        from
    }

    pub(crate) fn unrelocate(&mut self, player: Player, from: Pos) {
        let to = self.position(player);
        self.set(to, Cell::Empty);
        self.set(from, Cell::Owned(player));
        self.positions[player.index()] = from;
    }
}
