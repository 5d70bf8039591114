//! GARRISON headless runner.
//!
//! This crate wires the simulation crates into a standalone binary:
//! a fixed-cadence game loop fed by JSON commands on stdin, reporting
//! the session result on stdout.

pub mod game_loop;
pub mod state;

pub use garrison_core as core;
