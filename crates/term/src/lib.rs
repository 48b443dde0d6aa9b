//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. A `GameView`
//! draws a `Game` into a plain framebuffer, and `TerminalRenderer` writes only
//! the cells that changed since the previous frame.
//!
//! Board cells are drawn 2 columns wide by default to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fallblock_core as core;
pub use fallblock_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{dirty_runs, encode_frame, Run, TerminalRenderer};
