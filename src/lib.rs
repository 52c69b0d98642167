//! Decision-making core of a chess-playing agent: given a position and a time
//! budget, pick a move. Iterative deepening drives an alpha-beta minimax over
//! a shared mutable board, backed by a transposition table, a move-ordering
//! heuristic, and a material-plus-positional evaluator.
//!
//! Board mechanics (move generation, make/unmake, terminal detection, Zobrist
//! hashing) come from `shakmaty`, wrapped behind [`Position`].

pub mod evaluation;
pub mod ordering;
pub mod position;
pub mod pst;
pub mod search;
pub mod tt;
pub mod types;

pub use position::{Applied, InvalidFen, Position};
pub use search::{DecisionError, Searcher};
pub use types::{EngineConfig, Score};
