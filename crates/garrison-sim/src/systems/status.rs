//! Timer decay: status effects, reload clocks, bonus ages, and the
//! eagle's stone perimeter.
//!
//! Runs before anything consults a timer, so a status granted on tick
//! N starts ticking down on tick N+1 and an expiry is observed the
//! same tick it happens.

use hecs::World;

use garrison_core::components::{Eagle, EnemyTank, Pickup, Placement, PlayerTank, StatusSet};
use garrison_core::enums::CellKind;
use garrison_terrain::LevelGrid;

pub fn run(world: &mut World, terrain: &mut LevelGrid, dt_ms: u32) {
    for (_, statuses) in world.query_mut::<&mut StatusSet>() {
        statuses.decay(dt_ms);
    }

    for (_, tank) in world.query_mut::<&mut PlayerTank>() {
        tank.reload_ms = tank.reload_ms.saturating_sub(dt_ms);
    }
    for (_, tank) in world.query_mut::<&mut EnemyTank>() {
        tank.reload_ms = tank.reload_ms.saturating_sub(dt_ms);
    }

    for (_, pickup) in world.query_mut::<&mut Pickup>() {
        pickup.age_ms = pickup.age_ms.saturating_add(dt_ms);
    }

    // The Shovel perimeter reverts to brick the tick its clock runs out.
    let mut expired_eagle = None;
    for (_, (eagle, placement)) in world.query_mut::<(&mut Eagle, &Placement)>() {
        if eagle.fortified_ms > 0 {
            eagle.fortified_ms = eagle.fortified_ms.saturating_sub(dt_ms);
            if eagle.fortified_ms == 0 {
                expired_eagle = Some(placement.bounds());
            }
        }
    }
    if let Some(bounds) = expired_eagle {
        for (row, col) in terrain.perimeter_of(&bounds) {
            terrain.set_cell(row, col, Some(CellKind::Brick));
        }
        log::info!("eagle perimeter reverted to brick");
    }
}
