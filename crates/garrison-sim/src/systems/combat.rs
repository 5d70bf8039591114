//! Bullet collision resolution.
//!
//! Runs as a sequence of passes in a fixed order: terrain and eagle,
//! bushes, player bullets against enemies, enemy bullets against
//! players, then bullet-on-bullet. Every pass re-checks that both
//! parties are still live before applying an effect, so a bullet spent
//! by an earlier pass or a tank destroyed earlier in the same tick
//! quietly drops out.

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use garrison_core::components::{
    Eagle, EnemyTank, Placement, PlayerTank, Projectile, StatusSet,
};
use garrison_core::config::GameConfig;
use garrison_core::enums::{CellKind, Direction, Faction, StatusKind};
use garrison_core::events::RoundEvent;
use garrison_core::types::Rect;
use garrison_terrain::{blocks_bullet, LevelGrid};

use crate::world_setup;

pub fn run(
    world: &mut World,
    terrain: &mut LevelGrid,
    rng: &mut ChaCha8Rng,
    rules: &GameConfig,
    enemies_left: &mut u32,
    events: &mut Vec<RoundEvent>,
) {
    bullets_vs_terrain(world, terrain, events);
    bullets_vs_bushes(world, terrain, events);
    player_bullets_vs_enemies(world, rng, rules, enemies_left, events);
    enemy_bullets_vs_players(world, rules, events);
    bullets_vs_bullets(world);
}

/// Brick cells crumble and spend the bullet; stone spends the bullet
/// and stays. A hit on the live eagle destroys it no matter whose
/// bullet it was.
fn bullets_vs_terrain(world: &mut World, terrain: &mut LevelGrid, events: &mut Vec<RoundEvent>) {
    let eagle_box = world
        .query::<(&Eagle, &Placement)>()
        .iter()
        .filter(|(_, (eagle, _))| eagle.alive)
        .map(|(entity, (_, placement))| (entity, placement.bounds()))
        .next();

    let mut eagle_down = false;
    let mut hits: Vec<(Entity, Vec<(usize, usize)>, bool)> = Vec::new();
    for (entity, (placement, projectile)) in world.query::<(&Placement, &Projectile)>().iter() {
        if projectile.spent {
            continue;
        }
        let bounds = placement.bounds();
        let mut cells = Vec::new();
        if let Some((r0, r1, c0, c1)) = terrain.cell_span(&bounds) {
            for row in r0..=r1 {
                for col in c0..=c1 {
                    let Some(kind) = terrain.cell(row, col) else {
                        continue;
                    };
                    if blocks_bullet(kind) && bounds.intersects(&terrain.cell_rect(row, col)) {
                        cells.push((row, col));
                    }
                }
            }
        }
        let hit_eagle = eagle_box
            .as_ref()
            .is_some_and(|(_, eagle)| bounds.intersects(eagle));
        if !cells.is_empty() || hit_eagle {
            hits.push((entity, cells, hit_eagle));
        }
    }

    for (bullet, cells, hit_eagle) in hits {
        if let Ok(mut projectile) = world.get::<&mut Projectile>(bullet) {
            projectile.spent = true;
        }
        for (row, col) in cells {
            if terrain.cell(row, col) == Some(CellKind::Brick) {
                terrain.set_cell(row, col, None);
            }
        }
        if hit_eagle {
            eagle_down = true;
        }
    }

    if eagle_down {
        if let Some((entity, _)) = eagle_box {
            if let Ok(mut eagle) = world.get::<&mut Eagle>(entity) {
                eagle.alive = false;
            }
        }
        events.push(RoundEvent::EagleDestroyed);
        log::info!("eagle destroyed");
    }
}

/// Piercing shots mow down every bush cell they cross and are spent
/// doing it. Ordinary bullets fly straight through.
fn bullets_vs_bushes(world: &mut World, terrain: &mut LevelGrid, events: &mut Vec<RoundEvent>) {
    let mut hits: Vec<(Entity, Vec<(usize, usize)>)> = Vec::new();
    for (entity, (placement, projectile)) in world.query::<(&Placement, &Projectile)>().iter() {
        if projectile.spent || !projectile.piercing {
            continue;
        }
        let bounds = placement.bounds();
        let mut cells = Vec::new();
        if let Some((r0, r1, c0, c1)) = terrain.cell_span(&bounds) {
            for row in r0..=r1 {
                for col in c0..=c1 {
                    if terrain.cell(row, col) == Some(CellKind::Bush)
                        && bounds.intersects(&terrain.cell_rect(row, col))
                    {
                        cells.push((row, col));
                    }
                }
            }
        }
        if !cells.is_empty() {
            hits.push((entity, cells));
        }
    }

    for (bullet, cells) in hits {
        if let Ok(mut projectile) = world.get::<&mut Projectile>(bullet) {
            projectile.spent = true;
        }
        for (row, col) in cells {
            if terrain.destroy_bush(row, col) {
                events.push(RoundEvent::BushDestroyed { row, col });
            }
        }
    }
}

fn player_bullets_vs_enemies(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    rules: &GameConfig,
    enemies_left: &mut u32,
    events: &mut Vec<RoundEvent>,
) {
    let mut pairs: Vec<(Entity, Entity)> = Vec::new();
    for (bullet, (bullet_placement, projectile)) in
        world.query::<(&Placement, &Projectile)>().iter()
    {
        if projectile.spent || projectile.faction != Faction::Player {
            continue;
        }
        let bounds = bullet_placement.bounds();
        for (enemy, (enemy_placement, tank)) in world.query::<(&Placement, &EnemyTank)>().iter() {
            if tank.armor > 0 && bounds.intersects(&enemy_placement.bounds()) {
                pairs.push((bullet, enemy));
            }
        }
    }

    for (bullet, enemy) in pairs {
        let (spent, owner) = match world.get::<&Projectile>(bullet) {
            Ok(projectile) => (projectile.spent, projectile.owner),
            Err(_) => continue,
        };
        if spent {
            continue;
        }
        let armor_left = {
            let Ok(mut tank) = world.get::<&mut EnemyTank>(enemy) else {
                continue;
            };
            if tank.armor == 0 {
                continue;
            }
            tank.armor -= 1;
            tank.armor
        };
        if let Ok(mut projectile) = world.get::<&mut Projectile>(bullet) {
            projectile.spent = true;
        }
        if armor_left == 0 {
            credit_enemy_kill(world, rng, rules, enemy, Some(owner), enemies_left, events);
        }
    }
}

/// Account for a destroyed enemy: score to the owner's slot if the
/// owning tank still exists, tick the round counter down, and drop the
/// carried bonus at the wreck. The enemy entity itself stays in the
/// world with zero armor until cleanup prunes it.
pub(crate) fn credit_enemy_kill(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    rules: &GameConfig,
    enemy: Entity,
    owner: Option<Entity>,
    enemies_left: &mut u32,
    events: &mut Vec<RoundEvent>,
) {
    let Ok((tier, carries_bonus)) = world
        .get::<&EnemyTank>(enemy)
        .map(|t| (t.tier, t.carries_bonus))
    else {
        return;
    };
    let wreck_pos = world
        .get::<&Placement>(enemy)
        .map(|p| p.pos)
        .unwrap_or(Vec2::ZERO);

    let score = tier as u32 * rules.score_per_tier;
    let mut by = None;
    if let Some(owner) = owner {
        if let Ok(mut tank) = world.get::<&mut PlayerTank>(owner) {
            tank.score += score;
            by = Some(tank.slot);
        }
    }

    *enemies_left = enemies_left.saturating_sub(1);
    events.push(RoundEvent::EnemyDestroyed { tier, by, score });
    log::debug!("enemy down: tier {}, {} left in round", tier, enemies_left);

    if carries_bonus {
        let (_, kind) = world_setup::spawn_bonus(world, rng, wreck_pos);
        events.push(RoundEvent::BonusSpawned { kind });
    }
}

/// Enemy bullets against player tanks. A shield absorbs the hit; an
/// unshielded hit costs a life and sends the tank back to its start
/// point with upgrades stripped. The overlap is re-checked against the
/// player's current box so a tank respawned by an earlier bullet this
/// tick is not hit twice.
fn enemy_bullets_vs_players(world: &mut World, rules: &GameConfig, events: &mut Vec<RoundEvent>) {
    let mut pairs: Vec<(Entity, Entity)> = Vec::new();
    for (bullet, (bullet_placement, projectile)) in
        world.query::<(&Placement, &Projectile)>().iter()
    {
        if projectile.spent || projectile.faction != Faction::Enemy {
            continue;
        }
        let bounds = bullet_placement.bounds();
        for (player, (player_placement, tank)) in world.query::<(&Placement, &PlayerTank)>().iter()
        {
            if tank.lives > 0 && bounds.intersects(&player_placement.bounds()) {
                pairs.push((bullet, player));
            }
        }
    }

    for (bullet, player) in pairs {
        let (spent, bullet_bounds) = {
            let Ok(projectile) = world.get::<&Projectile>(bullet) else {
                continue;
            };
            let Ok(placement) = world.get::<&Placement>(bullet) else {
                continue;
            };
            (projectile.spent, placement.bounds())
        };
        if spent {
            continue;
        }

        let still_overlapping = world
            .get::<&Placement>(player)
            .map(|p| bullet_bounds.intersects(&p.bounds()))
            .unwrap_or(false);
        if !still_overlapping {
            continue;
        }

        if let Ok(mut projectile) = world.get::<&mut Projectile>(bullet) {
            projectile.spent = true;
        }

        let shielded = world
            .get::<&StatusSet>(player)
            .map(|s| s.has(StatusKind::Shield))
            .unwrap_or(false);
        if shielded {
            continue;
        }

        let (slot, lives_left) = {
            let Ok(mut tank) = world.get::<&mut PlayerTank>(player) else {
                continue;
            };
            if tank.lives == 0 {
                continue;
            }
            tank.lives -= 1;
            tank.stars = 0;
            tank.boat = false;
            tank.reload_ms = 0;
            (tank.slot, tank.lives)
        };
        events.push(RoundEvent::PlayerHit { slot, lives_left });

        if lives_left > 0 {
            let start = rules
                .player_starts
                .get(slot.index())
                .copied()
                .unwrap_or(Vec2::ZERO);
            if let Ok(mut placement) = world.get::<&mut Placement>(player) {
                placement.pos = start;
                placement.dir = Direction::Up;
            }
            if let Ok(mut statuses) = world.get::<&mut StatusSet>(player) {
                statuses.clear();
            }
        } else {
            events.push(RoundEvent::PlayerFallen { slot });
            log::info!("player {:?} has fallen", slot);
        }
    }
}

/// Any two live bullets that touch annihilate each other. No score,
/// no events.
fn bullets_vs_bullets(world: &mut World) {
    let mut live: Vec<(Entity, Rect)> = Vec::new();
    for (entity, (placement, projectile)) in world.query::<(&Placement, &Projectile)>().iter() {
        if !projectile.spent {
            live.push((entity, placement.bounds()));
        }
    }

    let mut spent: Vec<Entity> = Vec::new();
    for i in 0..live.len() {
        for j in (i + 1)..live.len() {
            if live[i].1.intersects(&live[j].1) {
                spent.push(live[i].0);
                spent.push(live[j].0);
            }
        }
    }
    for bullet in spent {
        if let Ok(mut projectile) = world.get::<&mut Projectile>(bullet) {
            projectile.spent = true;
        }
    }
}
