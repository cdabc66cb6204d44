//! AI module - board evaluation, move search, and the strategy catalog
//!
//! Everything here is pure: given a board and a weight vector, the same move
//! comes out every time. The sessions own the only mutable state.

pub mod evaluate;
pub mod search;
pub mod strategy;

// Re-export commonly used types
pub use evaluate::{board_stats, BoardStats};
pub use search::{find_best_move, Move, SEARCH_START_ROW};
pub use strategy::{next_strategy, strategy_by_id, Strategy, Weights, STRATEGIES};
