use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::grid::{check_size, Board};
use super::types::{Cell, Player, Pos};

/// Errors from parsing the compact `1.../..../..../...2` board form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("board has {rows} rows but row {row} has {len} cells")]
    NotSquare { rows: usize, row: usize, len: usize },

    #[error("invalid cell character '{0}'")]
    InvalidCell(char),

    #[error("player {player} appears {count} times, expected exactly once")]
    PlayerCount { player: u8, count: usize },

    #[error(transparent)]
    Size(#[from] crate::error::ConfigError),
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.trim().split('/').map(str::trim).collect();
        let size = rows.len();
        check_size(size)?;
        let mut cells = Vec::with_capacity(size * size);
        let mut found: [Vec<Pos>; 2] = [Vec::new(), Vec::new()];
        for (r, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != size {
                return Err(BoardParseError::NotSquare { rows: size, row: r, len });
            }
            for (c, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    '#' => Cell::Blocked,
                    '1' => Cell::Owned(Player::One),
                    '2' => Cell::Owned(Player::Two),
                    other => return Err(BoardParseError::InvalidCell(other)),
                };
                if let Cell::Owned(p) = cell {
                    found[p.index()].push(Pos::new(r, c));
                }
                cells.push(cell);
            }
        }
        for p in Player::BOTH {
            let count = found[p.index()].len();
            if count != 1 {
                return Err(BoardParseError::PlayerCount { player: p.id(), count });
            }
        }
        Ok(Board::from_parts(size, cells, [found[0][0], found[1][0]]))
    }
}

impl Board {
    /// Compact single-line form accepted by `FromStr`.
    pub fn to_code(&self) -> String {
        self.cells()
            .chunks(self.size())
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Board {
    /// Grid with column numbers on top and row numbers on the left.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.size() {
            write!(f, "{:>3}", c)?;
        }
        writeln!(f)?;
        for (r, row) in self.cells().chunks(self.size()).enumerate() {
            write!(f, "{:>3}", r)?;
            for cell in row {
                write!(f, "{:>3}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::zobrist;

    #[test]
    fn parses_and_prints_back() {
        let code = "1.#./..../.#../...2";
        let b: Board = code.parse().unwrap();
        assert_eq!(b.size(), 4);
        assert_eq!(b.position(Player::Two), Pos::new(3, 3));
        assert_eq!(b.blocked_count(), 2);
        assert_eq!(b.empty_count(), 12);
        assert_eq!(b.hash(), zobrist::compute(&b));
        assert_eq!(b.to_code(), code);
    }

    #[test]
    fn rejects_bad_shapes_and_players() {
        assert!(matches!("1./..2".parse::<Board>(), Err(BoardParseError::NotSquare { .. })));
        assert_eq!("1x/.2".parse::<Board>(), Err(BoardParseError::InvalidCell('x')));
        assert!(matches!("11/.2".parse::<Board>(), Err(BoardParseError::PlayerCount { player: 1, count: 2 })));
        assert!(matches!("1./..".parse::<Board>(), Err(BoardParseError::PlayerCount { player: 2, count: 0 })));
        assert!(matches!("1".parse::<Board>(), Err(BoardParseError::Size(_))));
    }
}
