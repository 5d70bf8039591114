//! Simulation constants and tuning parameters.
//!
//! Speeds are pixels per millisecond and timers are milliseconds, so the
//! engine can be stepped with raw frame deltas of any cadence.

// --- Grid geometry ---

/// Side of one square terrain cell in pixels.
pub const TILE_SIZE: u32 = 16;

/// Terrain columns per level.
pub const GRID_COLS: usize = 26;

/// Terrain rows per level.
pub const GRID_ROWS: usize = 26;

/// Battlefield width in pixels.
pub const MAP_WIDTH: f32 = (GRID_COLS as u32 * TILE_SIZE) as f32;

/// Battlefield height in pixels.
pub const MAP_HEIGHT: f32 = (GRID_ROWS as u32 * TILE_SIZE) as f32;

// --- Entity footprints ---

/// Tank collision box side (2x2 cells).
pub const TANK_SIZE: f32 = 32.0;

/// Bullet collision box side.
pub const BULLET_SIZE: f32 = 8.0;

/// Bonus pickup collision box side.
pub const BONUS_SIZE: f32 = 32.0;

/// Eagle collision box side.
pub const EAGLE_SIZE: f32 = 32.0;

// --- Speeds (pixels per millisecond) ---

/// Base tank speed before upgrades.
pub const TANK_BASE_SPEED: f32 = 0.06;

/// Base bullet speed before upgrades.
pub const BULLET_BASE_SPEED: f32 = 0.4;

// --- Timers (milliseconds) ---

/// Level banner duration before combat starts.
pub const LEVEL_INTRO_MS: u32 = 2_000;

/// Outro delay after the last enemy dies.
pub const LEVEL_CLEARED_MS: u32 = 5_000;

/// Defeat crawl duration before the session finishes.
pub const ROUND_LOST_MS: u32 = 3_000;

/// How long a tank keeps sliding after leaving ice.
pub const SLIP_MS: u32 = 380;

/// Shield duration from a Helmet bonus.
pub const SHIELD_MS: u32 = 10_000;

/// Enemy freeze duration from a Clock bonus.
pub const FREEZE_MS: u32 = 8_000;

/// Stone perimeter duration from a Shovel bonus.
pub const EAGLE_PROTECTION_MS: u32 = 15_000;

/// Minimum gap between consecutive enemy spawns.
pub const ENEMY_SPAWN_COOLDOWN_MS: u32 = 500;

/// How long a bonus stays on the field before vanishing.
pub const BONUS_LIFETIME_MS: u32 = 10_000;

/// Blink half-period for a bonus nearing expiry.
pub const BONUS_BLINK_MS: u32 = 350;

/// Gap between ambient bonus spawns while a round runs.
pub const AMBIENT_BONUS_INTERVAL_MS: u32 = 30_000;

/// Delay between consecutive player shots.
pub const PLAYER_RELOAD_MS: u32 = 120;

/// Frame deltas above this are dropped instead of simulated.
pub const MAX_FRAME_MS: u32 = 40;

/// Nominal frame step for a real-time driver.
pub const FRAME_MS: u32 = 16;

// --- Round policy ---

/// Enemies each level fields in total.
pub const ENEMIES_PER_ROUND: u32 = 20;

/// Enemies allowed on the field at once.
pub const MAX_ENEMIES_ON_MAP: usize = 4;

/// Ambient bonuses allowed on the field at once.
pub const MAX_AMBIENT_BONUSES: usize = 2;

/// Chance that a freshly spawned enemy carries a bonus drop.
pub const BONUS_CARRIER_CHANCE: f64 = 0.12;

/// Lives a player tank starts the session with.
pub const STARTING_LIVES: u8 = 3;

/// Weapon upgrade ceiling.
pub const MAX_STARS: u8 = 3;

// --- Scoring ---

/// Points per destroyed enemy, multiplied by its armor tier.
pub const SCORE_PER_TIER: u32 = 100;

/// Points for collecting any bonus.
pub const BONUS_SCORE: u32 = 300;

// --- Spawn geometry (pixels) ---

/// Enemy entry corners, cycled in order: left, center, right.
pub const ENEMY_ENTRY_POINTS: [(f32, f32); 3] = [(1.0, 1.0), (192.0, 1.0), (384.0, 1.0)];

/// Player start positions by slot, flanking the eagle.
pub const PLAYER_START_POINTS: [(f32, f32); 2] = [(128.0, 384.0), (256.0, 384.0)];

/// Eagle position (bottom center).
pub const EAGLE_POSITION: (f32, f32) = (192.0, 384.0);
