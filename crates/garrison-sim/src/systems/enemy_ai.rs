//! Glue between the ECS world and the pure steering FSM in
//! `garrison-enemy-ai`.
//!
//! Collects a context per enemy, evaluates the FSM, then applies the
//! decisions back. Returns the entities that want to fire this tick;
//! the firing system turns those into bullets.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use garrison_core::components::{EnemyTank, Placement, Steering, StatusSet};
use garrison_core::enums::{Direction, StatusKind};
use garrison_enemy_ai::fsm::{self, SteerContext};
use garrison_enemy_ai::profiles;

pub fn run(world: &mut World, rng: &mut ChaCha8Rng, dt_ms: u32) -> Vec<Entity> {
    struct Applied {
        dir: Direction,
        hold_ms: u32,
        fire: bool,
    }

    let mut decisions: Vec<(Entity, Applied)> = Vec::new();
    for (entity, (placement, tank, steering, statuses)) in world
        .query::<(&Placement, &EnemyTank, &Steering, &StatusSet)>()
        .iter()
    {
        let ctx = SteerContext {
            pos: placement.pos,
            dir: placement.dir,
            blocked: steering.blocked,
            hold_ms: steering.hold_ms.saturating_sub(dt_ms),
            target: steering.target,
            reload_ms: tank.reload_ms,
            frozen: statuses.has(StatusKind::Frozen),
        };
        let profile = profiles::tier_profile(tank.tier);
        let decision = fsm::evaluate(&ctx, &profile, rng);
        decisions.push((
            entity,
            Applied {
                dir: decision.dir,
                hold_ms: if decision.turned {
                    decision.hold_ms
                } else {
                    ctx.hold_ms
                },
                fire: decision.fire,
            },
        ));
    }

    let mut firing = Vec::new();
    for (entity, applied) in decisions {
        if let Ok(mut placement) = world.get::<&mut Placement>(entity) {
            placement.dir = applied.dir;
        }
        if let Ok(mut steering) = world.get::<&mut Steering>(entity) {
            steering.hold_ms = applied.hold_ms;
            // Locomotion re-arms this if the tank is still stuck.
            steering.blocked = false;
        }
        if applied.fire {
            firing.push(entity);
        }
    }
    firing
}
