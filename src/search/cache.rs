use crate::board::{Board, BoardKey, Player};
use crate::search::zobrist;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// How long cached scores live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheScope {
    /// Cleared at the start of every move decision.
    #[default]
    PerDecision,
    /// Kept across the decisions of one game; cleared when a new game starts.
    PerGame,
}

#[derive(Clone, Debug)]
struct Entry {
    hash: u64,
    player: Player,
    cells: BoardKey,
    score: f64,
    gen: u32,
}

const DEFAULT_WAYS: usize = 4;
pub const DEFAULT_CAPACITY: usize = 1 << 16;

#[derive(Default)]
struct Bucket {
    slots: [Option<Entry>; DEFAULT_WAYS],
}

/// Bounded evaluation cache. The Zobrist hash only picks the bucket; a hit
/// requires the full grid and the player to match exactly.
pub struct EvalCache {
    buckets: Vec<Mutex<Bucket>>,
    gen: AtomicU32,
}

impl Default for EvalCache {
    fn default() -> Self { Self::with_capacity(DEFAULT_CAPACITY) }
}

impl EvalCache {
    pub fn with_capacity(entries: usize) -> Self {
        let entries = entries.max(DEFAULT_WAYS);
        let buckets = (entries + DEFAULT_WAYS - 1) / DEFAULT_WAYS;
        let mut v = Vec::with_capacity(buckets);
        v.resize_with(buckets, || Mutex::new(Bucket::default()));
        Self { buckets: v, gen: AtomicU32::new(0) }
    }

    pub fn capacity(&self) -> usize { self.buckets.len() * DEFAULT_WAYS }

    fn key_hash(board: &Board, player: Player) -> u64 {
        board.hash() ^ zobrist::player_key(player)
    }

    fn bucket(&self, hash: u64) -> std::sync::MutexGuard<'_, Bucket> {
        let mixed = hash ^ (hash >> 32);
        let idx = (mixed as usize) % self.buckets.len();
        // A poisoned bucket only means another worker panicked mid-write; the data is plain values.
        self.buckets[idx].lock().unwrap_or_else(|e| e.into_inner())
    }

    fn matches(e: &Entry, hash: u64, player: Player, board: &Board) -> bool {
        e.hash == hash
            && e.player == player
            && e.cells.len() == board.cells().len()
            && e.cells.iter().zip(board.cells()).all(|(k, c)| *k == c.code())
    }

    pub fn get(&self, board: &Board, player: Player) -> Option<f64> {
        let hash = Self::key_hash(board, player);
        let g = self.bucket(hash);
        let hit = g.slots.iter().flatten().find(|e| Self::matches(e, hash, player, board)).map(|e| e.score);
        hit
    }

    pub fn put(&self, board: &Board, player: Player, score: f64) {
        let hash = Self::key_hash(board, player);
        let cur_gen = self.gen.load(Ordering::Relaxed);
        let mut g = self.bucket(hash);
        if let Some(slot) = g.slots.iter_mut().flatten().find(|e| Self::matches(e, hash, player, board)) {
            slot.score = score;
            slot.gen = cur_gen;
            return;
        }
        let e = Entry { hash, player, cells: board.key(), score, gen: cur_gen };
        if let Some(slot) = g.slots.iter_mut().find(|s| s.is_none()) {
            *slot = Some(e);
            return;
        }
        // Full bucket: evict the oldest generation.
        let victim = g
            .slots
            .iter()
            .enumerate()
            .min_by_key(|(_, s)| match s {
                Some(e) => e.gen,
                None => 0,
            })
            .map_or(0, |(i, _)| i);
        g.slots[victim] = Some(e);
    }

    pub fn len(&self) -> usize {
        self.buckets
            .iter()
            .map(|b| b.lock().unwrap_or_else(|e| e.into_inner()).slots.iter().flatten().count())
            .sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn clear(&self) {
        for b in &self.buckets {
            *b.lock().unwrap_or_else(|e| e.into_inner()) = Bucket::default();
        }
    }

    /// Marks subsequent inserts as newer than everything already stored.
    pub fn bump_generation(&self) { self.gen.fetch_add(1, Ordering::Relaxed); }
}
