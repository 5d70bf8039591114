//! Turns trigger state into bullets.
//!
//! Players fire while their fire control is held, limited by the
//! reload clock and by how many of their bullets are still in flight
//! (one, or two at star level 2+). Enemies fire when the steering FSM
//! says so, limited to one bullet in flight each.

use std::collections::HashMap;

use hecs::{Entity, World};

use garrison_core::components::{EnemyTank, Placement, PlayerTank, Projectile};
use garrison_core::config::GameConfig;
use garrison_core::enums::{Direction, Faction};
use garrison_core::types::Rect;
use garrison_enemy_ai::profiles;

use crate::world_setup;

struct Shot {
    owner: Entity,
    faction: Faction,
    bounds: Rect,
    dir: Direction,
    speed: f32,
    piercing: bool,
    reload_ms: u32,
}

/// `fire_held` is indexed by player slot. `enemy_shots` are the tanks
/// the AI pass decided should pull the trigger.
pub fn run(world: &mut World, rules: &GameConfig, fire_held: [bool; 2], enemy_shots: &[Entity]) {
    let mut in_flight: HashMap<Entity, u32> = HashMap::new();
    for (_, projectile) in world.query::<&Projectile>().iter() {
        if !projectile.spent {
            *in_flight.entry(projectile.owner).or_insert(0) += 1;
        }
    }

    let mut shots: Vec<Shot> = Vec::new();

    for (entity, (placement, tank)) in world.query::<(&Placement, &PlayerTank)>().iter() {
        if !fire_held[tank.slot.index()] || tank.reload_ms > 0 {
            continue;
        }
        let effects = tank.star_effects();
        if in_flight.get(&entity).copied().unwrap_or(0) >= effects.max_bullets {
            continue;
        }
        shots.push(Shot {
            owner: entity,
            faction: Faction::Player,
            bounds: placement.bounds(),
            dir: placement.dir,
            speed: rules.bullet_speed * effects.bullet_speed_mult,
            piercing: effects.piercing,
            reload_ms: rules.player_reload_ms,
        });
    }

    for &entity in enemy_shots {
        if in_flight.get(&entity).copied().unwrap_or(0) >= 1 {
            continue;
        }
        let Ok(placement) = world.get::<&Placement>(entity).map(|p| *p) else {
            continue;
        };
        let Ok(tier) = world.get::<&EnemyTank>(entity).map(|t| t.tier) else {
            continue;
        };
        shots.push(Shot {
            owner: entity,
            faction: Faction::Enemy,
            bounds: placement.bounds(),
            dir: placement.dir,
            speed: rules.bullet_speed,
            piercing: false,
            reload_ms: profiles::tier_profile(tier).reload_ms,
        });
    }

    for shot in shots {
        world_setup::spawn_bullet(
            world,
            shot.owner,
            shot.faction,
            shot.bounds,
            shot.dir,
            shot.speed,
            shot.piercing,
        );
        if let Ok(mut tank) = world.get::<&mut PlayerTank>(shot.owner) {
            tank.reload_ms = shot.reload_ms;
        } else if let Ok(mut tank) = world.get::<&mut EnemyTank>(shot.owner) {
            tank.reload_ms = shot.reload_ms;
        }
    }
}
