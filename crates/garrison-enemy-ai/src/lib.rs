//! Enemy AI for GARRISON.
//!
//! Implements the wander-toward-the-base steering machine and the
//! tier-driven behavior profiles for enemy tanks.

pub mod fsm;
pub mod profiles;

#[cfg(test)]
mod tests;
