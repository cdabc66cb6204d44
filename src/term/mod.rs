//! Terminal rendering for the split-screen battle.
//!
//! Rendering happens in two stages: [`BattleView`] lays out both panes, the
//! header and the commentary line into a [`FrameBuffer`], and
//! [`TerminalRenderer`] flushes that buffer to the terminal, diffing against
//! the previous frame so only changed runs are rewritten.
//!
//! Goals:
//! - Keep `core` free of any terminal dependency
//! - Draw board cells two characters wide so pieces look square
//! - Touch the terminal only where the frame actually changed

pub mod battle_view;
pub mod fb;
pub mod renderer;

pub use battle_view::{BattleScene, BattleView, MatchPhase, PlayerScene, VIEW_HEIGHT, VIEW_WIDTH};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use renderer::TerminalRenderer;
