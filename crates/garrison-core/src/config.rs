//! Session rules, built once at startup and immutable afterwards.
//!
//! Systems read tuning values from here rather than from the constants
//! directly, so tests and alternate modes can bend the rules without
//! touching code. `GameConfig::default()` mirrors `constants`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Key bindings for one player seat. Names follow the frontend's key
/// event identifiers; the simulation itself only ever sees commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerKeys {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub fire: String,
}

/// Every tunable rule of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    // --- Speeds (pixels per millisecond) ---
    pub tank_speed: f32,
    pub bullet_speed: f32,

    // --- Timers (milliseconds) ---
    pub intro_ms: u32,
    pub cleared_ms: u32,
    pub lost_ms: u32,
    pub slip_ms: u32,
    pub shield_ms: u32,
    pub freeze_ms: u32,
    pub eagle_protection_ms: u32,
    pub spawn_cooldown_ms: u32,
    pub bonus_lifetime_ms: u32,
    pub bonus_blink_ms: u32,
    pub ambient_bonus_ms: u32,
    pub player_reload_ms: u32,
    pub max_frame_ms: u32,

    // --- Round policy ---
    pub enemies_per_round: u32,
    pub max_enemies_on_map: usize,
    pub max_ambient_bonuses: usize,
    pub bonus_carrier_chance: f64,
    pub starting_lives: u8,

    // --- Scoring ---
    pub score_per_tier: u32,
    pub bonus_score: u32,

    // --- Spawn geometry (pixels) ---
    pub enemy_entries: Vec<Vec2>,
    pub player_starts: Vec<Vec2>,
    pub eagle_pos: Vec2,

    // --- Input ---
    pub player_keys: Vec<PlayerKeys>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tank_speed: TANK_BASE_SPEED,
            bullet_speed: BULLET_BASE_SPEED,
            intro_ms: LEVEL_INTRO_MS,
            cleared_ms: LEVEL_CLEARED_MS,
            lost_ms: ROUND_LOST_MS,
            slip_ms: SLIP_MS,
            shield_ms: SHIELD_MS,
            freeze_ms: FREEZE_MS,
            eagle_protection_ms: EAGLE_PROTECTION_MS,
            spawn_cooldown_ms: ENEMY_SPAWN_COOLDOWN_MS,
            bonus_lifetime_ms: BONUS_LIFETIME_MS,
            bonus_blink_ms: BONUS_BLINK_MS,
            ambient_bonus_ms: AMBIENT_BONUS_INTERVAL_MS,
            player_reload_ms: PLAYER_RELOAD_MS,
            max_frame_ms: MAX_FRAME_MS,
            enemies_per_round: ENEMIES_PER_ROUND,
            max_enemies_on_map: MAX_ENEMIES_ON_MAP,
            max_ambient_bonuses: MAX_AMBIENT_BONUSES,
            bonus_carrier_chance: BONUS_CARRIER_CHANCE,
            starting_lives: STARTING_LIVES,
            score_per_tier: SCORE_PER_TIER,
            bonus_score: BONUS_SCORE,
            enemy_entries: ENEMY_ENTRY_POINTS
                .iter()
                .map(|&(x, y)| Vec2::new(x, y))
                .collect(),
            player_starts: PLAYER_START_POINTS
                .iter()
                .map(|&(x, y)| Vec2::new(x, y))
                .collect(),
            eagle_pos: Vec2::new(EAGLE_POSITION.0, EAGLE_POSITION.1),
            player_keys: vec![
                PlayerKeys {
                    up: "ArrowUp".into(),
                    down: "ArrowDown".into(),
                    left: "ArrowLeft".into(),
                    right: "ArrowRight".into(),
                    fire: "ControlRight".into(),
                },
                PlayerKeys {
                    up: "KeyW".into(),
                    down: "KeyS".into(),
                    left: "KeyA".into(),
                    right: "KeyD".into(),
                    fire: "ControlLeft".into(),
                },
            ],
        }
    }
}
