//! Terrain system for GARRISON.
//!
//! Level grid storage, level file parsing, and the built-in campaign.

pub mod grid;
pub mod levels;
pub mod loader;

// Re-export key types for convenience.
pub use grid::{blocks_bullet, blocks_tank, LevelGrid};
pub use levels::{builtin, LevelSet};
pub use loader::{load_level, parse_level};
