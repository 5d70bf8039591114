//! Cleanup system: removes entities marked dead earlier in the tick.

use hecs::{Entity, World};

use garrison_core::components::{EnemyTank, Pickup, PlayerTank, Projectile};
use garrison_core::config::GameConfig;
use garrison_core::state::PlayerResult;

/// Sweep the kill marks left by the combat and pickup passes into
/// despawns, so no system ever observes a half-dead entity across a
/// tick boundary. Uses a pre-allocated buffer to avoid per-tick
/// allocation. Players who ran out of lives are recorded in `fallen`
/// before their tank despawns, so their score survives the session.
pub fn run(
    world: &mut World,
    rules: &GameConfig,
    despawn_buffer: &mut Vec<Entity>,
    fallen: &mut Vec<PlayerResult>,
) {
    despawn_buffer.clear();

    // Remove spent bullets.
    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.spent {
            despawn_buffer.push(entity);
        }
    }

    // Remove enemies whose armor was ground down to zero.
    for (entity, tank) in world.query_mut::<&EnemyTank>() {
        if tank.armor == 0 {
            despawn_buffer.push(entity);
        }
    }

    // Remove collected and timed-out bonuses.
    for (entity, pickup) in world.query_mut::<&Pickup>() {
        if pickup.taken || pickup.age_ms >= rules.bonus_lifetime_ms {
            despawn_buffer.push(entity);
        }
    }

    // Record and remove players with no lives left.
    for (entity, tank) in world.query_mut::<&PlayerTank>() {
        if tank.lives == 0 {
            fallen.push(PlayerResult {
                slot: tank.slot,
                score: tank.score,
                lives: 0,
                alive: false,
            });
            despawn_buffer.push(entity);
        }
    }

    // Despawn collected entities.
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
