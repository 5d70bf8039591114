//! Bonus collection and effects.
//!
//! A player tank driving over an uncollected bonus takes it, banks the
//! flat bonus score, and gets the effect applied immediately. The
//! `taken` flag goes up first so a second tank arriving in the same
//! tick gets nothing; the husk is pruned by cleanup.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use garrison_core::components::{Eagle, EnemyTank, Pickup, Placement, PlayerTank, StatusSet};
use garrison_core::config::GameConfig;
use garrison_core::constants::MAX_STARS;
use garrison_core::enums::{BonusKind, CellKind, StatusKind};
use garrison_core::events::RoundEvent;
use garrison_terrain::LevelGrid;

use crate::systems::combat;

pub fn run(
    world: &mut World,
    terrain: &mut LevelGrid,
    rng: &mut ChaCha8Rng,
    rules: &GameConfig,
    enemies_left: &mut u32,
    events: &mut Vec<RoundEvent>,
) {
    let mut pairs: Vec<(Entity, Entity)> = Vec::new();
    for (player, (player_placement, tank)) in world.query::<(&Placement, &PlayerTank)>().iter() {
        if tank.lives == 0 {
            continue;
        }
        let bounds = player_placement.bounds();
        for (bonus, (bonus_placement, pickup)) in world.query::<(&Placement, &Pickup)>().iter() {
            if pickup.taken || pickup.age_ms >= rules.bonus_lifetime_ms {
                continue;
            }
            if bounds.intersects(&bonus_placement.bounds()) {
                pairs.push((player, bonus));
            }
        }
    }

    for (player, bonus) in pairs {
        let kind = {
            let Ok(mut pickup) = world.get::<&mut Pickup>(bonus) else {
                continue;
            };
            if pickup.taken {
                continue;
            }
            pickup.taken = true;
            pickup.kind
        };
        let slot = {
            let Ok(mut tank) = world.get::<&mut PlayerTank>(player) else {
                continue;
            };
            tank.score += rules.bonus_score;
            tank.slot
        };
        events.push(RoundEvent::BonusCollected { kind, slot });
        log::info!("player {:?} collected {:?}", slot, kind);
        apply_effect(world, terrain, rng, rules, kind, player, enemies_left, events);
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_effect(
    world: &mut World,
    terrain: &mut LevelGrid,
    rng: &mut ChaCha8Rng,
    rules: &GameConfig,
    kind: BonusKind,
    player: Entity,
    enemies_left: &mut u32,
    events: &mut Vec<RoundEvent>,
) {
    match kind {
        BonusKind::Grenade => {
            let doomed: Vec<Entity> = world
                .query::<&EnemyTank>()
                .iter()
                .filter(|(_, tank)| tank.armor > 0)
                .map(|(entity, _)| entity)
                .collect();
            for enemy in doomed {
                if let Ok(mut tank) = world.get::<&mut EnemyTank>(enemy) {
                    tank.armor = 0;
                }
                combat::credit_enemy_kill(
                    world,
                    rng,
                    rules,
                    enemy,
                    Some(player),
                    enemies_left,
                    events,
                );
            }
        }
        BonusKind::Helmet => {
            if let Ok(mut statuses) = world.get::<&mut StatusSet>(player) {
                statuses.grant(StatusKind::Shield, rules.shield_ms);
            }
        }
        BonusKind::Clock => {
            for (_, statuses) in world.query_mut::<hecs::With<&mut StatusSet, &EnemyTank>>() {
                statuses.grant(StatusKind::Frozen, rules.freeze_ms);
            }
        }
        BonusKind::Shovel => {
            let mut eagle_bounds = None;
            for (_, (eagle, placement)) in world.query_mut::<(&mut Eagle, &Placement)>() {
                if eagle.alive {
                    eagle.fortified_ms = rules.eagle_protection_ms;
                    eagle_bounds = Some(placement.bounds());
                }
            }
            if let Some(bounds) = eagle_bounds {
                for (row, col) in terrain.perimeter_of(&bounds) {
                    terrain.set_cell(row, col, Some(CellKind::Stone));
                }
            }
        }
        BonusKind::Tank => {
            if let Ok(mut tank) = world.get::<&mut PlayerTank>(player) {
                tank.lives = tank.lives.saturating_add(1);
            }
        }
        BonusKind::Star => {
            if let Ok(mut tank) = world.get::<&mut PlayerTank>(player) {
                tank.stars = (tank.stars + 1).min(MAX_STARS);
            }
        }
        BonusKind::Weapon => {
            if let Ok(mut tank) = world.get::<&mut PlayerTank>(player) {
                tank.stars = MAX_STARS;
            }
        }
        BonusKind::Boat => {
            if let Ok(mut tank) = world.get::<&mut PlayerTank>(player) {
                tank.boat = true;
            }
        }
    }
}
