//! # Jerk limited motion profiles
//!
//! Generates S-curve profiles with constant velocity, acceleration and jerk
//! limits. The profile is built from an acceleration phase out of the start
//! state, an optional coast at the velocity limit, and a deceleration phase
//! into the goal. Deceleration phases are acceleration phases planned out of
//! the mirrored goal and then played backwards.
//!
//! If the limits cannot be met, for example because the start state is
//! already moving too fast to stop at the goal, the jerk limit is dropped and
//! an acceleration limited profile is generated instead.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};

// Internal
use super::{
    generate_simple_motion_profile, MotionProfile, MotionProfileBuilder, MotionState,
    ProfileError, EPSILON,
};
use util::maths::solve_quadratic;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Maximum number of bisection steps used to find the peak velocity of a
/// profile that never reaches the velocity limit.
const MAX_PEAK_SEARCH_ITERATIONS: usize = 1000;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Generate a jerk limited profile from `start` to `goal`.
///
/// A `max_jerk` of zero produces an acceleration limited profile.
pub fn generate_jerk_limited_profile(
    start: &MotionState,
    goal: &MotionState,
    max_vel: f64,
    max_accel: f64,
    max_jerk: f64,
) -> Result<MotionProfile, ProfileError> {
    if max_jerk.abs() < EPSILON {
        return generate_simple_motion_profile(start, goal, max_vel, max_accel);
    }

    if !(max_vel > 0.0) || !(max_accel > 0.0) || !max_jerk.is_finite() || max_jerk < 0.0 {
        return Err(ProfileError::InvalidConstraints {
            x: start.x,
            max_vel,
            max_accel,
        });
    }

    if goal.x < start.x {
        return Ok(generate_jerk_limited_profile(
            &start.flipped(),
            &goal.flipped(),
            max_vel,
            max_accel,
            max_jerk,
        )?
        .flipped());
    }

    let accel = accel_profile(start, max_vel, max_accel, max_jerk);
    let decel = decel_profile(goal, max_vel, max_accel, max_jerk);

    if let (Some(accel), Some(decel)) = (accel, decel) {
        let no_coast = join(start, &accel, &decel);
        let remaining = goal.x - no_coast.end().x;

        if remaining >= 0.0 {
            let profile = MotionProfileBuilder::new(*start)
                .append_profile(&accel)
                .append_jerk_control(0.0, remaining / max_vel)
                .append_profile(&decel)
                .build();

            debug!(
                "Generated jerk limited profile with coast, duration {:.3} s",
                profile.duration()
            );

            return Ok(profile);
        }
    }

    // The velocity limit is never reached, search for the peak velocity
    // that lands exactly on the goal
    let mut lower = 0.0;
    let mut upper = max_vel;

    for _ in 0..MAX_PEAK_SEARCH_ITERATIONS {
        let peak_vel = (lower + upper) / 2.0;

        let accel = accel_profile(start, peak_vel, max_accel, max_jerk);
        let decel = decel_profile(goal, peak_vel, max_accel, max_jerk);

        let (accel, decel) = match (accel, decel) {
            (Some(a), Some(d)) => (a, d),
            _ => break,
        };

        let profile = join(start, &accel, &decel);
        let error = goal.x - profile.end().x;

        if error.abs() < EPSILON {
            debug!(
                "Generated jerk limited profile with peak velocity {:.3}, duration {:.3} s",
                peak_vel,
                profile.duration()
            );
            return Ok(profile);
        }

        if error > 0.0 {
            lower = peak_vel;
        } else {
            upper = peak_vel;
        }
    }

    warn!(
        "Could not find a jerk limited profile from {:?} to {:?}, ignoring the jerk limit",
        start, goal
    );

    generate_simple_motion_profile(start, goal, max_vel, max_accel)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn join(start: &MotionState, accel: &MotionProfile, decel: &MotionProfile) -> MotionProfile {
    MotionProfileBuilder::new(*start)
        .append_profile(accel)
        .append_profile(decel)
        .build()
}

/// Deceleration phase ending at `goal`, planned as an acceleration phase out
/// of the mirrored goal and played backwards.
fn decel_profile(
    goal: &MotionState,
    max_vel: f64,
    max_accel: f64,
    max_jerk: f64,
) -> Option<MotionProfile> {
    let mirrored = MotionState::with_jerk(-goal.x, goal.v, -goal.a, 0.0);

    accel_profile(&mirrored, max_vel, max_accel, max_jerk).map(|p| p.reversed().flipped())
}

/// Smallest non-negative root of `a*t^2 + b*t + c = 0`.
fn min_positive_root(a: f64, b: f64, c: f64) -> Option<f64> {
    solve_quadratic(a, b, c)
        .into_iter()
        .filter(|t| *t >= 0.0)
        .fold(None, |min: Option<f64>, t| Some(min.map_or(t, |m| m.min(t))))
}

/// Bring `start` to `max_vel` with zero acceleration as quickly as the
/// acceleration and jerk limits allow.
///
/// Returns `None` if no such profile exists.
fn accel_profile(
    start: &MotionState,
    max_vel: f64,
    max_accel: f64,
    max_jerk: f64,
) -> Option<MotionProfile> {
    let builder = MotionProfileBuilder::new(MotionState::new(start.x, start.v, start.a));

    // First phase: ramp acceleration to the limit (or down to it if above)
    let (dt1, dv1) = if start.a > max_accel {
        let dt1 = (start.a - max_accel) / max_jerk;
        (dt1, start.a * dt1 - 0.5 * max_jerk * dt1 * dt1)
    } else {
        let dt1 = (max_accel - start.a) / max_jerk;
        (dt1, start.a * dt1 + 0.5 * max_jerk * dt1 * dt1)
    };

    // Last phase: ramp acceleration from the limit to zero
    let dt3 = max_accel / max_jerk;
    let dv3 = max_accel * dt3 - 0.5 * max_jerk * dt3 * dt3;

    // Velocity gained while holding the acceleration limit
    let dv2 = max_vel - start.v - dv1 - dv3;

    if dv2 >= 0.0 {
        let first = if start.a > max_accel {
            -max_jerk
        } else {
            max_jerk
        };

        return Some(
            builder
                .append_jerk_control(first, dt1)
                .append_jerk_control(0.0, dv2 / max_accel)
                .append_jerk_control(-max_jerk, dt3)
                .build(),
        );
    }

    let overshooting = start.a > max_accel
        || (start.v - max_vel) > (start.a * start.a) / (2.0 * max_jerk);

    if !overshooting {
        // No constant acceleration phase, shorten both ramps
        let dt1 = min_positive_root(
            max_jerk,
            2.0 * start.a,
            start.v - max_vel + start.a * start.a / (2.0 * max_jerk),
        )?;
        let dt3 = dt1 + start.a / max_jerk;

        return Some(
            builder
                .append_jerk_control(max_jerk, dt1)
                .append_jerk_control(-max_jerk, dt3)
                .build(),
        );
    }

    // Moving or accelerating too fast, ramp down to the negative acceleration
    // limit and back up
    let new_dt1 = (start.a + max_accel) / max_jerk;
    let new_dv1 = start.a * new_dt1 - 0.5 * max_jerk * new_dt1 * new_dt1;
    let new_dv2 = max_vel - start.v - new_dv1 + dv3;

    if new_dv2 > 0.0 {
        // The full ramp overshoots, find a shorter one
        let dt1 = min_positive_root(
            -max_jerk,
            2.0 * start.a,
            start.v - max_vel - start.a * start.a / (2.0 * max_jerk),
        )?;
        let dt3 = dt1 - start.a / max_jerk;

        if dt3 < 0.0 {
            return None;
        }

        Some(
            builder
                .append_jerk_control(-max_jerk, dt1)
                .append_jerk_control(max_jerk, dt3)
                .build(),
        )
    } else {
        Some(
            builder
                .append_jerk_control(-max_jerk, new_dt1)
                .append_jerk_control(0.0, new_dv2 / -max_accel)
                .append_jerk_control(max_jerk, dt3)
                .build(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rest(x: f64) -> MotionState {
        MotionState::new(x, 0.0, 0.0)
    }

    fn peak_velocity(profile: &MotionProfile) -> f64 {
        (0..=1000)
            .map(|i| profile.get(profile.duration() * i as f64 / 1000.0).v)
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_accel_profile() {
        let profile = accel_profile(&rest(0.0), 5.0, 5.0, 20.0).unwrap();

        assert_eq!(profile.segments().len(), 3);
        assert!((profile.duration() - 1.25).abs() < 1e-9);
        assert!((profile.end().v - 5.0).abs() < 1e-9);
        assert!(profile.end().a.abs() < 1e-9);
        assert!((profile.end().x - 3.125).abs() < 1e-9);
    }

    #[test]
    fn test_with_coast() -> Result<(), ProfileError> {
        let profile = generate_jerk_limited_profile(&rest(0.0), &rest(10.0), 5.0, 5.0, 20.0)?;

        assert!((profile.duration() - 3.25).abs() < 1e-6);
        assert!(profile.end().approx_eq(&rest(10.0), 1e-6));
        assert!((peak_velocity(&profile) - 5.0).abs() < 1e-6);

        // Acceleration is continuous and within the limit
        for i in 0..=1000 {
            let state = profile.get(profile.duration() * i as f64 / 1000.0);
            assert!(state.a.abs() <= 5.0 + 1e-9);
            assert!(state.j.abs() <= 20.0 + 1e-9);
        }

        Ok(())
    }

    #[test]
    fn test_without_coast() -> Result<(), ProfileError> {
        let profile = generate_jerk_limited_profile(&rest(0.0), &rest(4.0), 5.0, 5.0, 20.0)?;

        assert!((profile.end().x - 4.0).abs() < 1e-3);
        assert!(profile.end().v.abs() < 1e-3);

        let peak = peak_velocity(&profile);
        assert!(peak < 5.0);
        assert!(peak > 3.5);

        Ok(())
    }

    #[test]
    fn test_backwards() -> Result<(), ProfileError> {
        let profile = generate_jerk_limited_profile(&rest(10.0), &rest(0.0), 5.0, 5.0, 20.0)?;

        assert!((profile.duration() - 3.25).abs() < 1e-6);
        assert!(profile.end().approx_eq(&rest(0.0), 1e-6));
        assert!((profile.get(1.625).v + 5.0).abs() < 1e-6);

        Ok(())
    }

    #[test]
    fn test_zero_jerk_is_acceleration_limited() -> Result<(), ProfileError> {
        let profile = generate_jerk_limited_profile(&rest(0.0), &rest(10.0), 5.0, 5.0, 0.0)?;

        assert!((profile.duration() - 3.0).abs() < 1e-6);

        Ok(())
    }
}
