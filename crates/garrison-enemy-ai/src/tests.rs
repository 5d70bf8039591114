#[cfg(test)]
mod tests {
    use garrison_core::enums::Direction;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::fsm::{evaluate, SteerContext};
    use crate::profiles::tier_profile;

    fn make_context(dir: Direction, blocked: bool, hold_ms: u32) -> SteerContext {
        // Tank near the top of the field, target at the bottom center
        SteerContext {
            pos: Vec2::new(192.0, 16.0),
            dir,
            blocked,
            hold_ms,
            target: Vec2::new(192.0, 384.0),
            reload_ms: 0,
            frozen: false,
        }
    }

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_frozen_does_nothing() {
        let mut ctx = make_context(Direction::Left, true, 0);
        ctx.frozen = true;
        let decision = evaluate(&ctx, &tier_profile(1), &mut rng(1));
        assert!(!decision.turned);
        assert!(!decision.fire);
        assert_eq!(decision.dir, Direction::Left);
        assert_eq!(decision.hold_ms, 0, "frozen tanks do not refresh the hold");
    }

    #[test]
    fn test_heading_kept_while_hold_runs() {
        let ctx = make_context(Direction::Right, false, 500);
        let decision = evaluate(&ctx, &tier_profile(1), &mut rng(2));
        assert!(!decision.turned);
        assert_eq!(decision.dir, Direction::Right);
    }

    #[test]
    fn test_expired_hold_rolls_new_heading() {
        let ctx = make_context(Direction::Right, false, 0);
        let profile = tier_profile(1);
        let decision = evaluate(&ctx, &profile, &mut rng(3));
        assert!(decision.turned);
        assert!(decision.hold_ms >= profile.hold_min_ms);
        assert!(decision.hold_ms <= profile.hold_max_ms);
    }

    #[test]
    fn test_blocked_rolls_even_with_hold_left() {
        let ctx = make_context(Direction::Right, true, 900);
        let decision = evaluate(&ctx, &tier_profile(2), &mut rng(4));
        assert!(decision.turned);
    }

    /// With the target due south, Down must come up far more often than
    /// Up across many rolls.
    #[test]
    fn test_steering_biases_toward_target() {
        let profile = tier_profile(4);
        let mut r = rng(5);
        let mut down = 0u32;
        let mut up = 0u32;
        for _ in 0..2000 {
            let ctx = make_context(Direction::Right, false, 0);
            let decision = evaluate(&ctx, &profile, &mut r);
            match decision.dir {
                Direction::Down => down += 1,
                Direction::Up => up += 1,
                _ => {}
            }
        }
        assert!(
            down > up * 2,
            "expected a strong Down bias, got down={down} up={up}"
        );
    }

    /// A blocked tank should usually pick a different heading.
    #[test]
    fn test_blocked_heading_discounted() {
        let profile = tier_profile(1);
        let mut r = rng(6);
        let mut same = 0u32;
        for _ in 0..2000 {
            let ctx = make_context(Direction::Up, true, 0);
            let decision = evaluate(&ctx, &profile, &mut r);
            if decision.dir == Direction::Up {
                same += 1;
            }
        }
        assert!(
            same < 300,
            "blocked heading should rarely repeat, repeated {same} of 2000"
        );
    }

    #[test]
    fn test_fire_needs_ready_cannon() {
        let profile = tier_profile(4);
        let mut r = rng(7);

        let mut ctx = make_context(Direction::Down, false, 500);
        ctx.reload_ms = 350;
        for _ in 0..500 {
            let decision = evaluate(&ctx, &profile, &mut r);
            assert!(!decision.fire, "must not fire while reloading");
        }

        // With a ready cannon the trigger eventually rolls true
        ctx.reload_ms = 0;
        let fired = (0..500).any(|_| evaluate(&ctx, &profile, &mut r).fire);
        assert!(fired);
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let profile = tier_profile(3);
        let mut a = rng(42);
        let mut b = rng(42);
        for _ in 0..200 {
            let ctx = make_context(Direction::Right, false, 0);
            let da = evaluate(&ctx, &profile, &mut a);
            let db = evaluate(&ctx, &profile, &mut b);
            assert_eq!(da.dir, db.dir);
            assert_eq!(da.hold_ms, db.hold_ms);
            assert_eq!(da.fire, db.fire);
        }
    }

    #[test]
    fn test_profiles_scale_with_tier() {
        let t1 = tier_profile(1);
        let t4 = tier_profile(4);
        assert!(t4.fire_chance > t1.fire_chance);
        assert!(t4.aggression > t1.aggression);
        assert!(t4.reload_ms < t1.reload_ms);
        // Out-of-range tiers clamp instead of panicking
        let t0 = tier_profile(0);
        assert_eq!(t0.reload_ms, t1.reload_ms);
        let t9 = tier_profile(9);
        assert_eq!(t9.reload_ms, t4.reload_ms);
    }
}
