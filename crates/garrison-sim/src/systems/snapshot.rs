//! Snapshot system: queries the ECS world and builds a complete RoundSnapshot.
//!
//! This system is read-only — it never modifies the world.

use hecs::World;

use garrison_core::components::*;
use garrison_core::config::GameConfig;
use garrison_core::enums::*;
use garrison_core::events::RoundEvent;
use garrison_core::state::*;
use garrison_core::types::GameTime;
use garrison_terrain::LevelGrid;

/// Build a complete RoundSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    terrain: &LevelGrid,
    time: &GameTime,
    phase: RoundPhase,
    level: usize,
    enemies_left: u32,
    rules: &GameConfig,
    show_targets: bool,
    events: Vec<RoundEvent>,
    fallen: &[PlayerResult],
) -> RoundSnapshot {
    RoundSnapshot {
        time: *time,
        phase,
        level,
        enemies_left,
        grid: build_grid(terrain),
        tanks: build_tanks(world, show_targets),
        bullets: build_bullets(world),
        bonuses: build_bonuses(world, rules),
        eagle: build_eagle(world),
        players: build_players(world, fallen),
        events,
    }
}

fn build_grid(terrain: &LevelGrid) -> GridView {
    GridView {
        rows: terrain.rows(),
        cols: terrain.cols(),
        cells: terrain.cells().to_vec(),
        bushes: terrain.bushes().to_vec(),
    }
}

/// Build TankView list, players ordered by slot first, then enemies in
/// stable entity order.
fn build_tanks(world: &World, show_targets: bool) -> Vec<TankView> {
    let mut players: Vec<(usize, TankView)> = world
        .query::<(&Placement, &PlayerTank, &StatusSet)>()
        .iter()
        .map(|(_, (placement, tank, statuses))| {
            (
                tank.slot.index(),
                TankView {
                    faction: Faction::Player,
                    pos: placement.pos,
                    size: placement.size,
                    dir: placement.dir,
                    slot: Some(tank.slot),
                    tier: None,
                    shield_ms: statuses.remaining_ms(StatusKind::Shield),
                    frozen_ms: 0,
                    slipping_ms: statuses.remaining_ms(StatusKind::Slipping),
                    boat: tank.boat,
                    target: None,
                },
            )
        })
        .collect();
    players.sort_by_key(|(index, _)| *index);

    let mut enemies: Vec<(u64, TankView)> = world
        .query::<(&Placement, &EnemyTank, &Steering, &StatusSet)>()
        .iter()
        .map(|(entity, (placement, tank, steering, statuses))| {
            (
                entity.to_bits().get(),
                TankView {
                    faction: Faction::Enemy,
                    pos: placement.pos,
                    size: placement.size,
                    dir: placement.dir,
                    slot: None,
                    tier: Some(tank.tier),
                    shield_ms: 0,
                    frozen_ms: statuses.remaining_ms(StatusKind::Frozen),
                    slipping_ms: 0,
                    boat: false,
                    target: show_targets.then_some(steering.target),
                },
            )
        })
        .collect();
    enemies.sort_by_key(|(bits, _)| *bits);

    players
        .into_iter()
        .map(|(_, view)| view)
        .chain(enemies.into_iter().map(|(_, view)| view))
        .collect()
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut bullets: Vec<(u64, BulletView)> = world
        .query::<(&Placement, &Projectile)>()
        .iter()
        .filter(|(_, (_, projectile))| !projectile.spent)
        .map(|(entity, (placement, projectile))| {
            (
                entity.to_bits().get(),
                BulletView {
                    pos: placement.pos,
                    size: placement.size,
                    dir: placement.dir,
                    faction: projectile.faction,
                    piercing: projectile.piercing,
                },
            )
        })
        .collect();
    bullets.sort_by_key(|(bits, _)| *bits);
    bullets.into_iter().map(|(_, view)| view).collect()
}

/// Build BonusView list. Visibility toggles on the blink period so the
/// renderer can draw the classic flashing pickup without tracking time
/// itself.
fn build_bonuses(world: &World, rules: &GameConfig) -> Vec<BonusView> {
    let mut bonuses: Vec<(u64, BonusView)> = world
        .query::<(&Placement, &Pickup)>()
        .iter()
        .filter(|(_, (_, pickup))| !pickup.taken && pickup.age_ms < rules.bonus_lifetime_ms)
        .map(|(entity, (placement, pickup))| {
            (
                entity.to_bits().get(),
                BonusView {
                    kind: pickup.kind,
                    pos: placement.pos,
                    size: placement.size,
                    visible: (pickup.age_ms / rules.bonus_blink_ms) % 2 == 0,
                    remaining_ms: rules.bonus_lifetime_ms.saturating_sub(pickup.age_ms),
                },
            )
        })
        .collect();
    bonuses.sort_by_key(|(bits, _)| *bits);
    bonuses.into_iter().map(|(_, view)| view).collect()
}

fn build_eagle(world: &World) -> EagleView {
    world
        .query::<(&Eagle, &Placement)>()
        .iter()
        .next()
        .map(|(_, (eagle, placement))| EagleView {
            pos: placement.pos,
            alive: eagle.alive,
            protection_ms: eagle.fortified_ms,
        })
        .unwrap_or_default()
}

/// Build the side panel: live players first-hand, fallen players from
/// the session record so their final score stays on screen.
fn build_players(world: &World, fallen: &[PlayerResult]) -> Vec<PlayerPanelView> {
    let mut panel: Vec<PlayerPanelView> = world
        .query::<&PlayerTank>()
        .iter()
        .map(|(_, tank)| PlayerPanelView {
            slot: tank.slot,
            lives: tank.lives,
            score: tank.score,
            stars: tank.stars,
            alive: true,
        })
        .collect();

    for result in fallen {
        panel.push(PlayerPanelView {
            slot: result.slot,
            lives: result.lives,
            score: result.score,
            stars: 0,
            alive: false,
        });
    }

    panel.sort_by_key(|entry| entry.slot.index());
    panel
}
