//! Fallblock (workspace facade crate).
//!
//! Re-exports the member crates under `fallblock::{core,input,term,types}`
//! and hosts the driver that feeds the engine its ticks and commands.

pub mod driver;

pub use fallblock_core as core;
pub use fallblock_input as input;
pub use fallblock_term as term;
pub use fallblock_types as types;

pub use driver::Driver;
