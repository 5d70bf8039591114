//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// One noteworthy thing that happened during a frame. Drained into the
/// snapshot so the frontend can fire sounds and effects exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoundEvent {
    /// An enemy tank entered the field.
    EnemySpawned { tier: u8, carries_bonus: bool },
    /// An enemy tank was destroyed.
    EnemyDestroyed {
        tier: u8,
        /// Slot credited with the kill, if the owning tank still existed.
        by: Option<PlayerSlot>,
        score: u32,
    },
    /// A player tank lost a life and respawned.
    PlayerHit { slot: PlayerSlot, lives_left: u8 },
    /// A player tank ran out of lives and left the field.
    PlayerFallen { slot: PlayerSlot },
    /// A bush cell was mowed down by a piercing shot.
    BushDestroyed { row: usize, col: usize },
    /// A bonus appeared on the field.
    BonusSpawned { kind: BonusKind },
    /// A player collected a bonus.
    BonusCollected { kind: BonusKind, slot: PlayerSlot },
    /// The eagle was destroyed.
    EagleDestroyed,
    /// Every enemy of the level is gone.
    LevelCleared { level: usize },
    /// The round was lost.
    RoundLost,
}
