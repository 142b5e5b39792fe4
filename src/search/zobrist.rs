use crate::board::{Board, Cell, Player, MAX_SIZE};
use std::sync::OnceLock;

const MAX_CELLS: usize = MAX_SIZE * MAX_SIZE;
// Empty cells hash to zero; one key per non-empty state.
const STATES: usize = 3;

fn state_index(cell: Cell) -> Option<usize> {
    match cell {
        Cell::Empty => None,
        Cell::Owned(Player::One) => Some(0),
        Cell::Owned(Player::Two) => Some(1),
        Cell::Blocked => Some(2),
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

static TABLE: OnceLock<Vec<u64>> = OnceLock::new();
static PLAYER_KEY: OnceLock<u64> = OnceLock::new();

fn init_table() -> &'static [u64] {
    TABLE.get_or_init(|| {
        let mut t = vec![0u64; STATES * MAX_CELLS];
        let mut seed = 0x1501_A7E0_F00D_BEEF;
        for v in &mut t {
            seed = splitmix64(seed);
            *v = seed;
        }
        t
    })
}

/// Key contribution of `cell` sitting at flat index `idx`.
pub fn cell_key(idx: usize, cell: Cell) -> u64 {
    match state_index(cell) {
        Some(s) => init_table()[s * MAX_CELLS + idx],
        None => 0,
    }
}

/// Mixed into a board hash when the score is computed for player two.
pub fn player_key(player: Player) -> u64 {
    match player {
        Player::One => 0,
        Player::Two => *PLAYER_KEY.get_or_init(|| splitmix64(0xABCDEF1234567890)),
    }
}

/// Full recomputation; boards keep their hash incrementally, this is the reference.
pub fn compute(board: &Board) -> u64 {
    let mut key = 0u64;
    for (idx, cell) in board.cells().iter().enumerate() {
        key ^= cell_key(idx, *cell);
    }
    key
}
