//! Tier-specific behavioral profiles.
//!
//! Consolidates per-tier parameters for the steering FSM. Tiers 1
//! through 4 match the armor levels handed out by the spawner; higher
//! tiers reload faster and press toward the base harder.

/// Behavioral profile for an armor tier.
pub struct TierProfile {
    /// Chance to fire on any frame where the cannon is ready.
    pub fire_chance: f64,
    /// Shortest time a fresh heading is held (ms).
    pub hold_min_ms: u32,
    /// Longest time a fresh heading is held (ms).
    pub hold_max_ms: u32,
    /// Weight multiplier for headings that close on the target.
    pub aggression: f64,
    /// Cannon cooldown after each shot (ms).
    pub reload_ms: u32,
}

/// Get the behavioral profile for a given armor tier.
/// Tiers outside 1..=4 clamp to the nearest edge.
pub fn tier_profile(tier: u8) -> TierProfile {
    match tier {
        0 | 1 => TierProfile {
            fire_chance: 0.02,
            hold_min_ms: 400,
            hold_max_ms: 1400,
            aggression: 1.6,
            reload_ms: 1200,
        },
        2 => TierProfile {
            fire_chance: 0.025,
            hold_min_ms: 350,
            hold_max_ms: 1200,
            aggression: 1.9,
            reload_ms: 1000,
        },
        3 => TierProfile {
            fire_chance: 0.03,
            hold_min_ms: 350,
            hold_max_ms: 1100,
            aggression: 2.2,
            reload_ms: 900,
        },
        _ => TierProfile {
            fire_chance: 0.035,
            hold_min_ms: 300,
            hold_max_ms: 1000,
            aggression: 2.6,
            reload_ms: 800,
        },
    }
}
