//! Entity spawn factories for setting up the battlefield world.
//!
//! Creates player tanks, the eagle, enemy tanks, bullets, and bonuses
//! with appropriate component bundles.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use garrison_core::components::*;
use garrison_core::config::GameConfig;
use garrison_core::constants::*;
use garrison_core::enums::*;
use garrison_core::types::Rect;

/// Spawn the player tanks and the eagle for a fresh session.
pub fn setup_round(world: &mut World, rules: &GameConfig, player_count: u8) {
    for index in 0..player_count as usize {
        if let Some(slot) = PlayerSlot::from_index(index) {
            spawn_player(world, rules, slot);
        }
    }
    spawn_eagle(world, rules);
}

/// Spawn one player tank at its start position, facing up.
pub fn spawn_player(world: &mut World, rules: &GameConfig, slot: PlayerSlot) -> hecs::Entity {
    let pos = rules
        .player_starts
        .get(slot.index())
        .copied()
        .unwrap_or(Vec2::ZERO);

    world.spawn((
        Placement::new(pos, Vec2::splat(TANK_SIZE), Direction::Up),
        PlayerTank {
            slot,
            lives: rules.starting_lives,
            score: 0,
            stars: 0,
            boat: false,
            reload_ms: 0,
        },
        StatusSet::default(),
    ))
}

/// Respawn a surviving player tank on a fresh level, keeping its
/// carried state (lives, score, upgrades).
pub fn respawn_player(world: &mut World, rules: &GameConfig, tank: PlayerTank) -> hecs::Entity {
    let pos = rules
        .player_starts
        .get(tank.slot.index())
        .copied()
        .unwrap_or(Vec2::ZERO);
    world.spawn((
        Placement::new(pos, Vec2::splat(TANK_SIZE), Direction::Up),
        tank,
        StatusSet::default(),
    ))
}

/// Spawn the eagle at the bottom center of the field.
pub fn spawn_eagle(world: &mut World, rules: &GameConfig) -> hecs::Entity {
    world.spawn((
        Placement::new(rules.eagle_pos, Vec2::splat(EAGLE_SIZE), Direction::Up),
        Eagle {
            alive: true,
            fortified_ms: 0,
        },
    ))
}

/// Spawn one enemy tank at an entry point, rolling straight for the
/// eagle until its first steering decision.
pub fn spawn_enemy(
    world: &mut World,
    rules: &GameConfig,
    pos: Vec2,
    tier: u8,
    carries_bonus: bool,
) -> hecs::Entity {
    world.spawn((
        Placement::new(pos, Vec2::splat(TANK_SIZE), Direction::Down),
        EnemyTank {
            tier,
            armor: tier,
            carries_bonus,
            reload_ms: garrison_enemy_ai::profiles::tier_profile(tier).reload_ms,
        },
        Steering {
            hold_ms: 0,
            blocked: false,
            target: rules.eagle_pos,
        },
        StatusSet::default(),
    ))
}

/// Spawn a bullet from the muzzle of `owner`, centered on the firing
/// edge of the tank so it lines up with the barrel.
pub fn spawn_bullet(
    world: &mut World,
    owner: hecs::Entity,
    faction: Faction,
    tank_bounds: Rect,
    dir: Direction,
    speed: f32,
    piercing: bool,
) -> hecs::Entity {
    let center = tank_bounds.center();
    let pos = match dir {
        Direction::Up => Vec2::new(center.x - BULLET_SIZE / 2.0, tank_bounds.y - BULLET_SIZE),
        Direction::Down => Vec2::new(center.x - BULLET_SIZE / 2.0, tank_bounds.bottom()),
        Direction::Left => Vec2::new(tank_bounds.x - BULLET_SIZE, center.y - BULLET_SIZE / 2.0),
        Direction::Right => Vec2::new(tank_bounds.right(), center.y - BULLET_SIZE / 2.0),
    };

    world.spawn((
        Placement::new(pos, Vec2::splat(BULLET_SIZE), dir),
        Projectile {
            owner,
            faction,
            speed,
            piercing,
            spent: false,
        },
    ))
}

/// Spawn a bonus of a random kind at the given position.
pub fn spawn_bonus(world: &mut World, rng: &mut ChaCha8Rng, pos: Vec2) -> (hecs::Entity, BonusKind) {
    let kind = BonusKind::ALL[rng.gen_range(0..BonusKind::ALL.len())];
    let entity = world.spawn((
        Placement::new(pos, Vec2::splat(BONUS_SIZE), Direction::Up),
        Pickup {
            kind,
            age_ms: 0,
            taken: false,
        },
    ));
    (entity, kind)
}

/// Roll a random bonus position that stays on the field and clear of
/// the eagle. Falls back to the field center if the draw keeps landing
/// on the eagle.
pub fn roll_bonus_position(rng: &mut ChaCha8Rng, rules: &GameConfig) -> Vec2 {
    let eagle = Rect::new(
        rules.eagle_pos.x,
        rules.eagle_pos.y,
        EAGLE_SIZE,
        EAGLE_SIZE,
    );
    let max_col = GRID_COLS - 2;
    let max_row = GRID_ROWS - 2;
    for _ in 0..16 {
        let col = rng.gen_range(0..=max_col);
        let row = rng.gen_range(0..=max_row);
        let pos = Vec2::new((col as u32 * TILE_SIZE) as f32, (row as u32 * TILE_SIZE) as f32);
        let bounds = Rect::new(pos.x, pos.y, BONUS_SIZE, BONUS_SIZE);
        if !bounds.intersects(&eagle) {
            return pos;
        }
    }
    Vec2::new(MAP_WIDTH / 2.0 - BONUS_SIZE / 2.0, MAP_HEIGHT / 2.0 - BONUS_SIZE / 2.0)
}
