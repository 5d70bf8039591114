//! Movement integration with predictive collision stopping.
//!
//! Tanks never penetrate terrain: the predicted box for this tick is
//! clamped along the motion axis to the nearest blocking cell edge,
//! grid edge, or the eagle box, so a stopped tank sits exactly flush
//! with what stopped it. Tank pairs whose predicted boxes would
//! overlap both hold position for the tick. Bullets fly unclamped and
//! die at the map edge; everything else about them is combat's
//! business.

use hecs::{Entity, World};

use garrison_core::components::{
    Eagle, EnemyTank, Placement, PlayerTank, Projectile, StatusSet, Steering,
};
use garrison_core::config::GameConfig;
use garrison_core::enums::{CellKind, Direction, StatusKind};
use garrison_core::types::Rect;
use garrison_terrain::{blocks_tank, LevelGrid};

/// Movement below this many pixels counts as fully stopped.
const STOP_EPSILON: f32 = 0.001;

struct Intent {
    entity: Entity,
    current: Rect,
    resolved: Rect,
    wants_move: bool,
    enemy: bool,
}

/// `player_motion` is the desired travel direction per slot, already
/// reduced from the held-key stack by the engine.
pub fn run(
    world: &mut World,
    terrain: &LevelGrid,
    rules: &GameConfig,
    player_motion: [Option<Direction>; 2],
    dt_ms: u32,
) {
    let eagle_box = world
        .query::<(&Eagle, &Placement)>()
        .iter()
        .map(|(_, (_, placement))| placement.bounds())
        .next();

    let mut intents: Vec<Intent> = Vec::new();

    // Player tanks: steer from input unless slipping, then advance.
    for (entity, (placement, tank, statuses)) in
        world.query_mut::<(&mut Placement, &PlayerTank, &StatusSet)>()
    {
        let slipping = statuses.has(StatusKind::Slipping);
        let input = player_motion[tank.slot.index()];
        let wants_move = if slipping {
            // Ice carries the tank along its last heading.
            true
        } else if let Some(dir) = input {
            placement.dir = dir;
            true
        } else {
            false
        };

        let current = placement.bounds();
        let resolved = if wants_move {
            let step = rules.tank_speed * tank.star_effects().tank_speed_mult * dt_ms as f32;
            advance_tank(
                terrain,
                &current,
                placement.dir,
                step,
                tank.boat,
                eagle_box.as_ref(),
            )
        } else {
            current
        };
        intents.push(Intent {
            entity,
            current,
            resolved,
            wants_move,
            enemy: false,
        });
    }

    // Enemy tanks roll along their facing unless frozen.
    for (entity, (placement, _, statuses)) in world
        .query::<(&Placement, &EnemyTank, &StatusSet)>()
        .iter()
    {
        let wants_move = !statuses.has(StatusKind::Frozen);
        let current = placement.bounds();
        let resolved = if wants_move {
            let step = rules.tank_speed * dt_ms as f32;
            advance_tank(terrain, &current, placement.dir, step, false, eagle_box.as_ref())
        } else {
            current
        };
        intents.push(Intent {
            entity,
            current,
            resolved,
            wants_move,
            enemy: true,
        });
    }

    // Tank-vs-tank: any pair whose resolved boxes would overlap holds
    // position. Pairs already overlapping (spawn stacking) are exempt
    // so they can drive apart. Checked against everyone's resolved box
    // so the outcome does not depend on iteration order.
    let mut cancelled = vec![false; intents.len()];
    for i in 0..intents.len() {
        for j in (i + 1)..intents.len() {
            if intents[i].current.intersects(&intents[j].current) {
                continue;
            }
            if intents[i].resolved.intersects(&intents[j].resolved) {
                cancelled[i] = true;
                cancelled[j] = true;
            }
        }
    }

    for (index, intent) in intents.iter().enumerate() {
        let target = if cancelled[index] {
            &intent.current
        } else {
            &intent.resolved
        };
        let moved = (target.x - intent.current.x).abs() + (target.y - intent.current.y).abs();

        if let Ok(mut placement) = world.get::<&mut Placement>(intent.entity) {
            placement.pos.x = target.x;
            placement.pos.y = target.y;
        }
        if intent.enemy && intent.wants_move && moved < STOP_EPSILON {
            if let Ok(mut steering) = world.get::<&mut Steering>(intent.entity) {
                steering.blocked = true;
            }
        } else if !intent.enemy && moved >= STOP_EPSILON {
            // Ice under a player that actually travelled this tick
            // (re)arms the slip clock, so the tank coasts across the
            // patch on its last heading. A tank pinned against a wall
            // does not re-arm and regains control when the clock runs
            // out.
            let center = glam::Vec2::new(target.x + target.w / 2.0, target.y + target.h / 2.0);
            let on_ice = terrain
                .cell_at_point(center)
                .and_then(|(row, col)| terrain.cell(row, col))
                == Some(CellKind::Ice);
            if on_ice {
                if let Ok(mut statuses) = world.get::<&mut StatusSet>(intent.entity) {
                    statuses.grant(StatusKind::Slipping, rules.slip_ms);
                }
            }
        }
    }

    // Bullets fly straight; leaving the map spends them.
    for (_, (placement, projectile)) in world.query_mut::<(&mut Placement, &mut Projectile)>() {
        if projectile.spent {
            continue;
        }
        let step = projectile.speed * dt_ms as f32;
        placement.pos += placement.dir.offset() * step;
        let bounds = placement.bounds();
        if bounds.x < 0.0
            || bounds.y < 0.0
            || bounds.right() > terrain.width_px()
            || bounds.bottom() > terrain.height_px()
        {
            projectile.spent = true;
        }
    }
}

/// Advance a tank box one step along `dir`, clamped to the nearest
/// blocking edge. The result never overshoots backwards past the
/// starting position, so a box already overlapping something (Shovel
/// walls can appear under a tank) just stays put on that axis.
fn advance_tank(
    terrain: &LevelGrid,
    bounds: &Rect,
    dir: Direction,
    step: f32,
    boat: bool,
    eagle: Option<&Rect>,
) -> Rect {
    let mut moved = bounds.translated(dir.offset() * step);

    if moved.x < 0.0 {
        moved.x = 0.0;
    }
    if moved.y < 0.0 {
        moved.y = 0.0;
    }
    if moved.right() > terrain.width_px() {
        moved.x = terrain.width_px() - moved.w;
    }
    if moved.bottom() > terrain.height_px() {
        moved.y = terrain.height_px() - moved.h;
    }

    if let Some((r0, r1, c0, c1)) = terrain.cell_span(&moved) {
        for row in r0..=r1 {
            for col in c0..=c1 {
                let Some(kind) = terrain.cell(row, col) else {
                    continue;
                };
                if !blocks_tank(kind, boat) {
                    continue;
                }
                let cell = terrain.cell_rect(row, col);
                if moved.intersects(&cell) {
                    clamp_to(&mut moved, &cell, dir);
                }
            }
        }
    }

    if let Some(eagle) = eagle {
        if moved.intersects(eagle) {
            clamp_to(&mut moved, eagle, dir);
        }
    }

    match dir {
        Direction::Up => moved.y = moved.y.min(bounds.y),
        Direction::Down => moved.y = moved.y.max(bounds.y),
        Direction::Left => moved.x = moved.x.min(bounds.x),
        Direction::Right => moved.x = moved.x.max(bounds.x),
    }
    moved
}

/// Pull `moved` back along the motion axis until it sits flush against
/// `obstacle`.
fn clamp_to(moved: &mut Rect, obstacle: &Rect, dir: Direction) {
    match dir {
        Direction::Up => moved.y = moved.y.max(obstacle.bottom()),
        Direction::Down => moved.y = moved.y.min(obstacle.y - moved.h),
        Direction::Left => moved.x = moved.x.max(obstacle.right()),
        Direction::Right => moved.x = moved.x.min(obstacle.x - moved.w),
    }
}
