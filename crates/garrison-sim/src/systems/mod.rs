//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state — all state lives in components or explicit
//! system-state structs held by the engine.

pub mod cleanup;
pub mod combat;
pub mod enemy_ai;
pub mod firing;
pub mod locomotion;
pub mod pickup;
pub mod snapshot;
pub mod spawner;
pub mod status;
