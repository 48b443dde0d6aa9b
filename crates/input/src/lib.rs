//! Terminal input module (driver-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Timing
//! (gravity, soft-drop repeat) is the driver's job, not this crate's.

pub mod map;

pub use fallblock_types as types;

pub use map::{handle_key_event, is_soft_drop_key, should_quit};
