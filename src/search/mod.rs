pub mod alphabeta;
pub mod cache;
pub mod eval;
pub mod reference;
pub mod zobrist;

pub use alphabeta::{SearchError, SearchParams, SearchResult, Searcher};
pub use cache::{CacheScope, EvalCache};
