//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods beyond small
//! derived-attribute accessors. Game logic lives in systems, not components.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Rect;

/// Position and facing of anything that occupies battlefield space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Placement {
    /// Top-left corner of the collision box in pixels.
    pub pos: Vec2,
    /// Collision box size in pixels.
    pub size: Vec2,
    /// Current facing.
    pub dir: Direction,
}

/// One timed condition on a tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimedStatus {
    pub kind: StatusKind,
    pub remaining_ms: u32,
}

/// Set of timed conditions. Granting a kind that is already present
/// refreshes its clock instead of stacking a second copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusSet {
    pub effects: Vec<TimedStatus>,
}

/// Player-controlled tank state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTank {
    pub slot: PlayerSlot,
    /// Lives left. A tank at 0 is removed by cleanup the same tick.
    pub lives: u8,
    pub score: u32,
    /// Weapon upgrade level, 0 through MAX_STARS.
    pub stars: u8,
    /// Whether a Boat bonus lets this tank cross water.
    pub boat: bool,
    /// Cooldown until the next shot is allowed.
    pub reload_ms: u32,
}

/// Enemy tank state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTank {
    /// Armor tier, 1 through 4. Doubles as the score multiplier.
    pub tier: u8,
    /// Hits left. Starts equal to the tier; 0 means destroyed.
    pub armor: u8,
    /// Whether destroying this tank drops a bonus.
    pub carries_bonus: bool,
    /// Cooldown until the next shot is allowed.
    pub reload_ms: u32,
}

/// Autonomous steering state for an enemy tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Steering {
    /// Time left before the current heading is reconsidered.
    pub hold_ms: u32,
    /// Set by the movement pass when the last attempt was fully stopped.
    pub blocked: bool,
    /// Point this tank drifts toward when rolling a new heading.
    pub target: Vec2,
}

/// A bullet in flight.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    /// Tank that fired this bullet. The handle may be stale by the time
    /// it is consulted; anything resolving it must tolerate a dead owner.
    pub owner: hecs::Entity,
    pub faction: Faction,
    /// Speed in pixels per millisecond.
    pub speed: f32,
    /// Piercing shots mow down bushes.
    pub piercing: bool,
    /// Marked by collision passes; despawned by cleanup at end of tick.
    pub spent: bool,
}

/// A bonus waiting on the field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: BonusKind,
    /// Time since spawn; the pickup vanishes past BONUS_LIFETIME_MS.
    pub age_ms: u32,
    /// Marked the instant a player collects it so a second tank in the
    /// same tick gets nothing.
    pub taken: bool,
}

/// The base eagle. Destroying it loses the round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Eagle {
    pub alive: bool,
    /// Remaining time on the Shovel stone perimeter; 0 means inactive.
    pub fortified_ms: u32,
}

/// Weapon attributes a player tank gains per star level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarEffects {
    pub bullet_speed_mult: f32,
    pub tank_speed_mult: f32,
    pub max_bullets: u32,
    pub piercing: bool,
}

impl Placement {
    pub fn new(pos: Vec2, size: Vec2, dir: Direction) -> Self {
        Self { pos, size, dir }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_corner_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

impl StatusSet {
    /// Grant `kind` for `duration_ms`, refreshing the clock if already present.
    pub fn grant(&mut self, kind: StatusKind, duration_ms: u32) {
        for effect in &mut self.effects {
            if effect.kind == kind {
                effect.remaining_ms = duration_ms;
                return;
            }
        }
        self.effects.push(TimedStatus {
            kind,
            remaining_ms: duration_ms,
        });
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Remaining time for `kind`, or 0 if not active.
    pub fn remaining_ms(&self, kind: StatusKind) -> u32 {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining_ms)
            .unwrap_or(0)
    }

    /// Tick every effect down by `dt_ms` and drop the expired ones.
    pub fn decay(&mut self, dt_ms: u32) {
        for effect in &mut self.effects {
            effect.remaining_ms = effect.remaining_ms.saturating_sub(dt_ms);
        }
        self.effects.retain(|e| e.remaining_ms > 0);
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

impl PlayerTank {
    /// Weapon attributes at this tank's current star level.
    pub fn star_effects(&self) -> StarEffects {
        match self.stars {
            0 => StarEffects {
                bullet_speed_mult: 1.0,
                tank_speed_mult: 1.0,
                max_bullets: 1,
                piercing: false,
            },
            1 => StarEffects {
                bullet_speed_mult: 1.3,
                tank_speed_mult: 1.1,
                max_bullets: 1,
                piercing: false,
            },
            2 => StarEffects {
                bullet_speed_mult: 1.3,
                tank_speed_mult: 1.1,
                max_bullets: 2,
                piercing: false,
            },
            _ => StarEffects {
                bullet_speed_mult: 1.3,
                tank_speed_mult: 1.1,
                max_bullets: 2,
                piercing: true,
            },
        }
    }
}
