use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Numeric identity as shown to users (1 or 2).
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.id() as usize - 1
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Owned(Player),
    Blocked,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Compact code used for exact cache keys: 0 empty, 1/2 owned, 3 blocked.
    pub(crate) fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Owned(p) => p.id(),
            Cell::Blocked => 3,
        }
    }

    pub(crate) fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Owned(Player::One) => '1',
            Cell::Owned(Player::Two) => '2',
            Cell::Blocked => '#',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset by (dr, dc), or None when the result would leave a `size`-wide board.
    pub fn offset(self, dr: isize, dc: isize, size: usize) -> Option<Pos> {
        let r = self.row.checked_add_signed(dr)?;
        let c = self.col.checked_add_signed(dc)?;
        if r < size && c < size { Some(Pos::new(r, c)) } else { None }
    }

    pub fn manhattan(self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn is_adjacent(self, other: Pos) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Pos::new(row, col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position '{0}': expected 'row col' or 'row,col'")]
pub struct ParsePosError(pub String);

impl FromStr for Pos {
    type Err = ParsePosError;

    /// Accepts "r c", "r,c" and "(r,c)".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim().trim_start_matches('(').trim_end_matches(')');
        let mut parts = cleaned.split(|c: char| c == ',' || c.is_whitespace()).filter(|p| !p.is_empty());
        let row = parts.next().and_then(|p| p.parse().ok());
        let col = parts.next().and_then(|p| p.parse().ok());
        match (row, col, parts.next()) {
            (Some(row), Some(col), None) => Ok(Pos::new(row, col)),
            _ => Err(ParsePosError(s.to_string())),
        }
    }
}

/// One full turn: relocate the mover's token, then block a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub relocation: Pos,
    pub block: Pos,
}

impl Action {
    pub const fn new(relocation: Pos, block: Pos) -> Self {
        Self { relocation, block }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.relocation, self.block)
    }
}
