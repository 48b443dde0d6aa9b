//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the game: the piece catalog, the board
//! with its single falling piece, line clearing and scoring, and the piece
//! supply with its hold slot. It has **no dependency** on rendering, input
//! devices or timing; a driver feeds it commands and drop ticks.
//!
//! # Module Structure
//!
//! - [`catalog`]: static shapes, four rotations per kind, no kicks
//! - [`piece`]: a concrete piece (kind, color, orientation)
//! - [`board`]: grid, collision, locking, line clearing
//! - [`scoring`]: points for a line clear
//! - [`supply`]: next-piece preview and hold slot
//! - [`rng`]: injectable random source
//! - [`config`]: board size, seed, palette
//! - [`game_state`]: command/query facade for drivers
//! - [`snapshot`]: piece previews for drawing
//!
//! # Game Rules
//!
//! - **Spawn**: row 0, random column, random starting orientation
//! - **Rotation**: fixed four-state cycle, rejected if it does not fit in place
//! - **Lock**: a piece locks as soon as a drop tick cannot move it down
//! - **Hold**: once per spawned piece
//! - **Scoring**: `width * rows`, squared when exactly four rows clear at once
//!
//! # Example
//!
//! ```
//! use fallblock_core::{EngineConfig, Game};
//! use fallblock_types::Descent;
//!
//! let mut game = Game::new(EngineConfig::default()).unwrap();
//! assert!(game.spawn_next());
//!
//! game.move_left();
//! game.rotate_right();
//! while game.soft_drop_tick() == Descent::Falling {}
//!
//! assert!(!game.has_active_piece());
//! assert!(game.spawn_next());
//! ```

pub mod board;
pub mod catalog;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod supply;

pub use fallblock_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{get_shape, max_playable_extent, shapes_for, RotationSet, RotationShape, ShapeCell};
pub use config::{ConfigError, EngineConfig, Palette};
pub use game_state::Game;
pub use piece::Piece;
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scoring::{calculate_line_score, LineClear};
pub use snapshot::PiecePreview;
pub use supply::{HoldOutcome, PieceSupply};
