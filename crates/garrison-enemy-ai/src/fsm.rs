//! Enemy tank steering and trigger logic.
//!
//! Pure functions that decide, for one enemy per frame, whether to keep
//! rolling, turn onto a new heading, and whether to pull the trigger.
//! No ECS dependency — operates on plain data, randomness injected.

use garrison_core::enums::Direction;
use glam::Vec2;
use rand::Rng;

use crate::profiles::TierProfile;

/// Input to the steering FSM for a single enemy.
pub struct SteerContext {
    /// Top-left corner of the tank.
    pub pos: Vec2,
    pub dir: Direction,
    /// The last movement attempt was fully stopped.
    pub blocked: bool,
    /// Time left on the current heading.
    pub hold_ms: u32,
    /// Point the tank drifts toward when picking a heading.
    pub target: Vec2,
    /// Time left until the cannon is ready.
    pub reload_ms: u32,
    /// Frozen tanks neither steer nor fire.
    pub frozen: bool,
}

/// Output of the steering FSM.
pub struct SteerDecision {
    pub dir: Direction,
    /// New hold clock. Meaningful only when `turned` is set.
    pub hold_ms: u32,
    pub turned: bool,
    pub fire: bool,
}

/// Evaluate steering for one enemy. A turn is rolled when the hold
/// clock has run out or the tank drove into something; the trigger is
/// rolled whenever the cannon is ready.
pub fn evaluate<R: Rng>(ctx: &SteerContext, profile: &TierProfile, rng: &mut R) -> SteerDecision {
    if ctx.frozen {
        return SteerDecision {
            dir: ctx.dir,
            hold_ms: ctx.hold_ms,
            turned: false,
            fire: false,
        };
    }

    let mut dir = ctx.dir;
    let mut hold_ms = ctx.hold_ms;
    let mut turned = false;

    if ctx.blocked || ctx.hold_ms == 0 {
        dir = pick_direction(ctx, profile, rng);
        hold_ms = rng.gen_range(profile.hold_min_ms..=profile.hold_max_ms);
        turned = true;
    }

    let fire = ctx.reload_ms == 0 && rng.gen_bool(profile.fire_chance);

    SteerDecision {
        dir,
        hold_ms,
        turned,
        fire,
    }
}

/// Weighted heading draw. The two axis headings that close on the
/// target carry the profile's aggression weight, so hungrier tiers
/// press toward the base harder while everyone still wanders.
fn pick_direction<R: Rng>(ctx: &SteerContext, profile: &TierProfile, rng: &mut R) -> Direction {
    let to_target = ctx.target - ctx.pos;

    let mut weights = [1.0f64; 4];
    for (i, dir) in Direction::ALL.iter().enumerate() {
        let step = dir.offset();
        let closes = step.x * to_target.x + step.y * to_target.y;
        if closes > 0.0 {
            weights[i] *= profile.aggression;
        }
        // Driving into a wall and picking the same heading again just
        // grinds in place, so discount it heavily.
        if ctx.blocked && *dir == ctx.dir {
            weights[i] *= 0.25;
        }
    }

    let total: f64 = weights.iter().sum();
    let mut draw = rng.gen_range(0.0..total);
    for (i, dir) in Direction::ALL.iter().enumerate() {
        if draw < weights[i] {
            return *dir;
        }
        draw -= weights[i];
    }
    // Float rounding can leave the draw a hair past the last bucket.
    Direction::Left
}
