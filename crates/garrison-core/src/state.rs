//! Round snapshot — the complete visible state sent to the frontend each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::RoundEvent;
use crate::types::GameTime;

/// Complete round state broadcast to the frontend after each frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub time: GameTime,
    pub phase: RoundPhase,
    /// Zero-based level index.
    pub level: usize,
    /// Enemies still to be destroyed this level (spawned or not).
    pub enemies_left: u32,
    pub grid: GridView,
    pub tanks: Vec<TankView>,
    pub bullets: Vec<BulletView>,
    pub bonuses: Vec<BonusView>,
    pub eagle: EagleView,
    /// Side-panel entries, fallen players included.
    pub players: Vec<PlayerPanelView>,
    /// Events since the previous snapshot, drained on read.
    pub events: Vec<RoundEvent>,
}

/// Terrain for rendering: obstacle cells row-major, bushes listed
/// separately because they draw above the tanks they hide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridView {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Option<CellKind>>,
    pub bushes: Vec<(usize, usize)>,
}

/// A tank on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankView {
    pub faction: Faction,
    pub pos: Vec2,
    pub size: Vec2,
    pub dir: Direction,
    /// Set for player tanks.
    pub slot: Option<PlayerSlot>,
    /// Set for enemy tanks.
    pub tier: Option<u8>,
    /// Remaining shield time, 0 when inactive. Drives the shield flicker.
    pub shield_ms: u32,
    /// Remaining freeze time, 0 when inactive.
    pub frozen_ms: u32,
    /// Remaining slide time, 0 when inactive.
    pub slipping_ms: u32,
    /// Whether the tank can cross water.
    pub boat: bool,
    /// Steering target, present only when the debug overlay is on.
    pub target: Option<Vec2>,
}

/// A bullet in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub size: Vec2,
    pub dir: Direction,
    pub faction: Faction,
    pub piercing: bool,
}

/// A bonus waiting on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusView {
    pub kind: BonusKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// False on blink-off frames; the renderer skips drawing.
    pub visible: bool,
    /// Time left before the bonus vanishes.
    pub remaining_ms: u32,
}

/// Eagle status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EagleView {
    pub pos: Vec2,
    pub alive: bool,
    /// Remaining Shovel protection, 0 when inactive.
    pub protection_ms: u32,
}

/// Per-player side panel entry. Fallen players keep their line with
/// `alive` false so final scores stay visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerPanelView {
    pub slot: PlayerSlot,
    pub lives: u8,
    pub score: u32,
    pub stars: u8,
    pub alive: bool,
}

/// Summary returned once a session has finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    pub outcome: RoundOutcome,
    /// Zero-based index of the level the session ended on.
    pub level_reached: usize,
    pub players: Vec<PlayerResult>,
}

/// Final standing of one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerResult {
    pub slot: PlayerSlot,
    pub score: u32,
    pub lives: u8,
    pub alive: bool,
}
