//! Simulation engine for GARRISON.
//!
//! Owns the hecs ECS world, steps the battlefield one frame at a time,
//! and produces RoundSnapshots for the frontend.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::{GameEngine, SessionConfig};
pub use garrison_core as core;
