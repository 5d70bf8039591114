//! Enemy and bonus spawning policy.
//!
//! Enemy tanks enter the field through three fixed entry points at the
//! top edge, rotating left to right. Spawning is gated on a cooldown
//! and on `alive < min(max_on_map, remaining)`, which keeps at most
//! four enemies on the map and never spawns more than the round total.
//! Ambient bonuses drop on a fixed interval while fewer than two
//! uncollected bonuses are on the field.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use garrison_core::components::{EnemyTank, Pickup};
use garrison_core::config::GameConfig;
use garrison_core::events::RoundEvent;

use crate::world_setup;

/// Mutable spawner bookkeeping, reset at the start of every level.
pub struct SpawnerState {
    /// Time until the next enemy spawn is allowed.
    pub cooldown_ms: u32,
    /// Next entry point in the rotation.
    pub entry_index: usize,
    /// Time until the next ambient bonus drop.
    pub ambient_ms: u32,
}

impl SpawnerState {
    pub fn new(rules: &GameConfig) -> Self {
        Self {
            cooldown_ms: rules.spawn_cooldown_ms,
            entry_index: 0,
            ambient_ms: rules.ambient_bonus_ms,
        }
    }
}

/// Tick the spawner. `level` is the 1-based level number, `enemies_left`
/// the count of enemies not yet destroyed this round (on the map or
/// still unspawned).
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    rules: &GameConfig,
    state: &mut SpawnerState,
    level: u32,
    enemies_left: u32,
    dt_ms: u32,
    events: &mut Vec<RoundEvent>,
) {
    state.cooldown_ms = state.cooldown_ms.saturating_sub(dt_ms);
    state.ambient_ms = state.ambient_ms.saturating_sub(dt_ms);

    let alive = world.query::<&EnemyTank>().iter().count() as u32;
    let cap = (rules.max_enemies_on_map as u32).min(enemies_left);
    if state.cooldown_ms == 0 && alive < cap {
        let entry = rules.enemy_entries[state.entry_index % rules.enemy_entries.len()];
        state.entry_index = (state.entry_index + 1) % rules.enemy_entries.len();
        state.cooldown_ms = rules.spawn_cooldown_ms;

        let tier = roll_tier(rng, level);
        let carries_bonus = rng.gen_bool(rules.bonus_carrier_chance);
        world_setup::spawn_enemy(world, rules, entry, tier, carries_bonus);
        events.push(RoundEvent::EnemySpawned { tier, carries_bonus });
        log::debug!("enemy spawned: tier {} at {:?}", tier, entry);
    }

    if state.ambient_ms == 0 {
        state.ambient_ms = rules.ambient_bonus_ms;
        let on_field = world
            .query::<&Pickup>()
            .iter()
            .filter(|(_, p)| !p.taken)
            .count();
        if on_field < rules.max_ambient_bonuses {
            let pos = world_setup::roll_bonus_position(rng, rules);
            let (_, kind) = world_setup::spawn_bonus(world, rng, pos);
            events.push(RoundEvent::BonusSpawned { kind });
            log::debug!("ambient bonus spawned: {:?} at {:?}", kind, pos);
        }
    }
}

/// Weighted armor-tier draw. Higher levels shift the distribution
/// toward tier 4.
fn roll_tier(rng: &mut ChaCha8Rng, level: u32) -> u8 {
    let weights: [u32; 4] = [8u32.saturating_sub(level).max(1), 4, 3, 2 + level];
    let total: u32 = weights.iter().sum();
    let mut draw = rng.gen_range(0..total);
    for (index, weight) in weights.iter().enumerate() {
        if draw < *weight {
            return index as u8 + 1;
        }
        draw -= weight;
    }
    4
}
