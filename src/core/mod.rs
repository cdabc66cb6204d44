//! Core module - pure game logic with no external dependencies
//!
//! This module contains the grid, the shape catalog, the piece stream, and
//! the session state machine. It has zero dependencies on UI or I/O.

pub mod board;
pub mod pieces;
pub mod rng;
pub mod session;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use pieces::{shapes, Shape, SPAWN_POSITION};
pub use rng::{PieceStream, SimpleRng};
pub use session::{ActivePiece, GameSession};
pub use snapshot::SessionSnapshot;
