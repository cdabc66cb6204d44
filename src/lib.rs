//! Two falling-block engines playing against each other in a terminal.
//!
//! The crate is split along the same lines as the screen: [`core`] owns the
//! board, the piece catalog and the per-player session, [`ai`] owns board
//! evaluation and move search, [`term`] draws the split-screen battle view,
//! and [`commentary`] narrates the match. The binary in `main.rs` wires the
//! pieces into an event loop.

pub mod ai;
pub mod commentary;
pub mod core;
pub mod term;
pub mod types;
