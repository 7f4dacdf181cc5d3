//! # Dynamic constraint motion profile generation
//!
//! Generates profiles obeying displacement dependent velocity and
//! acceleration limits using the forward/backward pass method of section 3.2
//! of Sprunk, "Planning Motion Trajectories for Mobile Robots Using Splines"
//! (2008).
//!
//! 1. The displacement range is split into `resolution` equal steps and the
//!    constraints are sampled at each step boundary.
//! 2. A forward pass accelerates as hard as allowed from the start state,
//!    coasting wherever the velocity limit binds.
//! 3. A backward pass does the same walking back from the goal state, and is
//!    then turned around so it runs forwards into the goal.
//! 4. The two passes are merged by always following the lower of the two
//!    velocity envelopes, splitting segments where the envelopes cross.
//! 5. Each displacement segment is converted to a timed motion segment.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};

// Internal
use super::{
    DisplacementProfile, DisplacementSegment, DisplacementState, MotionConstraints,
    MotionProfile, MotionSegment, MotionState, ProfileError, SimpleMotionConstraints, EPSILON,
};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Generate a motion profile from `start` to `goal` obeying the given
/// constraints, sampled at `resolution` equal steps.
///
/// If `goal.x < start.x` the profile is planned from the goal back to the
/// start and then reversed, so the velocities will be negative.
///
/// The profile's `start()` and `end()` are where its segments actually begin
/// and finish. An endpoint velocity above the velocity limit is clipped to the
/// limit, so the profile then starts or ends at the limit instead of the
/// requested velocity.
pub fn generate_motion_profile<C>(
    start: &MotionState,
    goal: &MotionState,
    constraints: &C,
    resolution: usize,
) -> Result<MotionProfile, ProfileError>
where
    C: MotionConstraints + ?Sized,
{
    if resolution == 0 {
        return Err(ProfileError::InvalidResolution);
    }

    if goal.x < start.x {
        let profile = generate_motion_profile(
            &MotionState::new(goal.x, -goal.v, goal.a),
            &MotionState::new(start.x, -start.v, start.a),
            constraints,
            resolution,
        )?;
        return Ok(profile.reversed());
    }

    let length = goal.x - start.x;

    let displacement_profile = generate_displacement_profile(
        DisplacementState::new(start.v, start.a),
        DisplacementState::new(goal.v, goal.a),
        length,
        &|s| constraints.get(start.x + s),
        resolution,
    )?;

    let profile = convert_profile(&displacement_profile, start)?;

    debug!(
        "Generated motion profile over {:.3} with {} segments, duration {:.3} s",
        length,
        profile.segments().len(),
        profile.duration()
    );

    Ok(profile)
}

/// Generate a profile with constant velocity and acceleration limits.
///
/// This is the dynamic generator with a single step, giving a triangular or
/// trapezoidal velocity profile.
pub fn generate_simple_motion_profile(
    start: &MotionState,
    goal: &MotionState,
    max_vel: f64,
    max_accel: f64,
) -> Result<MotionProfile, ProfileError> {
    generate_motion_profile(
        start,
        goal,
        &SimpleMotionConstraints::new(max_vel, max_accel),
        1,
    )
}

/// Generate the merged displacement profile over `[0, length]`.
///
/// `constraints` is queried with displacements relative to the start.
pub fn generate_displacement_profile(
    start: DisplacementState,
    goal: DisplacementState,
    length: f64,
    constraints: &dyn Fn(f64) -> SimpleMotionConstraints,
    resolution: usize,
) -> Result<DisplacementProfile, ProfileError> {
    if resolution == 0 {
        return Err(ProfileError::InvalidResolution);
    }

    let (dx, samples) = sample_constraints(length, constraints, resolution)?;

    // Forward steps use the limits at the start of each step, backward steps
    // the limits at the end of each step.
    let forward = forward_pass(start, dx, samples[..resolution].iter());
    let backward = forward_pass(goal, dx, samples[1..].iter().rev()).reversed();

    let merged = merge_passes(forward.into_segments(), backward.into_segments());

    Ok(DisplacementProfile::new(coalesce(merged)))
}

/// Run only the backward pass over `[0, length]`, starting from the
/// velocity limit at the end of the range.
///
/// This gives the highest velocity at each displacement from which the end
/// of the range can still be reached within the constraints.
pub fn generate_backward_pass(
    length: f64,
    constraints: &dyn Fn(f64) -> SimpleMotionConstraints,
    resolution: usize,
) -> Result<DisplacementProfile, ProfileError> {
    if resolution == 0 {
        return Err(ProfileError::InvalidResolution);
    }

    let (dx, samples) = sample_constraints(length, constraints, resolution)?;
    let last = DisplacementState::new(samples[resolution].max_vel, 0.0);

    Ok(forward_pass(last, dx, samples[1..].iter().rev()).reversed())
}

/// Convert a displacement profile into a time indexed profile starting at
/// `start.x`.
///
/// An empty displacement profile gives a stationary profile at `start`.
pub fn convert_profile(
    displacement_profile: &DisplacementProfile,
    start: &MotionState,
) -> Result<MotionProfile, ProfileError> {
    let mut x = start.x;
    let mut segments = Vec::with_capacity(displacement_profile.segments().len());

    for segment in displacement_profile.segments() {
        let state = segment.start;
        let dt = segment.duration().ok_or(ProfileError::Infeasible {
            x,
            v: state.v,
            a: state.a,
        })?;

        if !dt.is_finite() {
            return Err(ProfileError::Infeasible {
                x,
                v: state.v,
                a: state.a,
            });
        }

        segments.push(MotionSegment::new(MotionState::new(x, state.v, state.a), dt));
        x += segment.dx;
    }

    if segments.is_empty() {
        return Ok(MotionProfile::stationary(MotionState::new(
            start.x, start.v, start.a,
        )));
    }

    Ok(MotionProfile::new(segments))
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Sample the constraints at the `resolution + 1` step boundaries, checking
/// that every sample is usable.
fn sample_constraints(
    length: f64,
    constraints: &dyn Fn(f64) -> SimpleMotionConstraints,
    resolution: usize,
) -> Result<(f64, Vec<SimpleMotionConstraints>), ProfileError> {
    let dx = length / resolution as f64;

    let samples = (0..=resolution)
        .map(|i| {
            let x = i as f64 * dx;
            let c = constraints(x);

            if c.max_vel.is_nan() || c.max_vel < 0.0 || !(c.max_accel > 0.0) {
                Err(ProfileError::InvalidConstraints {
                    x,
                    max_vel: c.max_vel,
                    max_accel: c.max_accel,
                })
            } else {
                Ok(c)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((dx, samples))
}

/// Accelerate as hard as allowed from `start`, one step of `dx` per
/// constraint sample.
fn forward_pass<'a, I>(start: DisplacementState, dx: f64, constraints: I) -> DisplacementProfile
where
    I: Iterator<Item = &'a SimpleMotionConstraints>,
{
    let mut segments = Vec::new();
    let mut last = start;

    for c in constraints {
        if last.v >= c.max_vel {
            // Already at (or above) the limit, coast at the limit
            let segment = DisplacementSegment::new(DisplacementState::new(c.max_vel, 0.0), dx);
            last = segment.end();
            segments.push(segment);
        } else {
            let final_vel = (last.v * last.v + 2.0 * c.max_accel * dx).sqrt();

            if final_vel <= c.max_vel {
                let segment =
                    DisplacementSegment::new(DisplacementState::new(last.v, c.max_accel), dx);
                last = segment.end();
                segments.push(segment);
            } else {
                // Reach the limit part way through the step, then coast
                let accel_dx = (c.max_vel * c.max_vel - last.v * last.v) / (2.0 * c.max_accel);
                let accel =
                    DisplacementSegment::new(DisplacementState::new(last.v, c.max_accel), accel_dx);
                let coast =
                    DisplacementSegment::new(DisplacementState::new(c.max_vel, 0.0), dx - accel_dx);
                last = coast.end();
                segments.push(accel);
                segments.push(coast);
            }
        }
    }

    DisplacementProfile::new(segments)
}

/// Merge the forward and backward passes, keeping the lower velocity
/// envelope at every displacement.
///
/// Both lists are walked with a single index. Where the segments at the
/// index differ in length the longer one is split and its remainder inserted
/// at the next index, so after each step both lists have consumed the same
/// displacement.
fn merge_passes(
    mut forward: Vec<DisplacementSegment>,
    mut backward: Vec<DisplacementSegment>,
) -> Vec<DisplacementSegment> {
    let mut merged = Vec::with_capacity(forward.len().max(backward.len()));

    let mut i = 0;
    while i < forward.len() && i < backward.len() {
        let mut fwd = forward[i];
        let mut bwd = backward[i];

        if (fwd.dx - bwd.dx).abs() >= EPSILON {
            if fwd.dx > bwd.dx {
                forward.insert(
                    i + 1,
                    DisplacementSegment::new(fwd.get(bwd.dx), fwd.dx - bwd.dx),
                );
                fwd = DisplacementSegment::new(fwd.start, bwd.dx);
            } else {
                backward.insert(
                    i + 1,
                    DisplacementSegment::new(bwd.get(fwd.dx), bwd.dx - fwd.dx),
                );
                bwd = DisplacementSegment::new(bwd.start, fwd.dx);
            }
        }

        let (lower, higher) = if fwd.start.v <= bwd.start.v {
            (fwd, bwd)
        } else {
            (bwd, fwd)
        };

        if lower.end().v <= higher.end().v + EPSILON {
            merged.push(lower);
        } else {
            // The envelopes cross inside this step
            let x = intersection(&lower.start, &higher.start)
                .max(0.0)
                .min(lower.dx);

            trace!("Forward and backward passes cross {:.6} into step {}", x, i);

            merged.push(DisplacementSegment::new(lower.start, x));
            merged.push(DisplacementSegment::new(higher.get(x), higher.dx - x));
        }

        i += 1;
    }

    merged
}

/// Displacement at which two constant acceleration envelopes have the same
/// velocity.
fn intersection(state1: &DisplacementState, state2: &DisplacementState) -> f64 {
    let denominator = 2.0 * state2.a - 2.0 * state1.a;

    if denominator.abs() < EPSILON {
        return 0.0;
    }

    (state1.v * state1.v - state2.v * state2.v) / denominator
}

/// Drop negligible segments and join neighbours that continue the same
/// constant acceleration.
fn coalesce(segments: Vec<DisplacementSegment>) -> Vec<DisplacementSegment> {
    let mut out: Vec<DisplacementSegment> = Vec::with_capacity(segments.len());

    for segment in segments.into_iter().filter(|s| s.dx > EPSILON) {
        if let Some(last) = out.last_mut() {
            if (last.start.a - segment.start.a).abs() < EPSILON
                && (last.end().v - segment.start.v).abs() < EPSILON
            {
                last.dx += segment.dx;
                continue;
            }
        }
        out.push(segment);
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::profile::FnMotionConstraints;

    fn rest(x: f64) -> MotionState {
        MotionState::new(x, 0.0, 0.0)
    }

    fn stopped_at(state: &MotionState, x: f64) -> bool {
        (state.x - x).abs() < 1e-6 && state.v.abs() < 1e-6
    }

    /// Checks the profile never exceeds the limits, sampling every `dt`.
    fn obeys<C: MotionConstraints>(profile: &MotionProfile, constraints: &C, tol: f64) -> bool {
        let n = 2000;
        (0..=n).all(|i| {
            let state = profile.get(profile.duration() * i as f64 / n as f64);
            let c = constraints.get(state.x);
            state.v.abs() <= c.max_vel + tol && state.a.abs() <= c.max_accel + tol
        })
    }

    #[test]
    fn test_triangular_profile() -> Result<(), ProfileError> {
        let profile = generate_simple_motion_profile(&rest(0.0), &rest(10.0), 1000.0, 5.0)?;

        // The end is where the last segment finishes, still braking
        let last_end = profile.segments()[profile.segments().len() - 1].end();
        assert_eq!(profile.end(), last_end);
        assert!(stopped_at(&last_end, 10.0));
        assert!((last_end.a + 5.0).abs() < 1e-9);
        assert!((profile.duration() - 2.0 * 2f64.sqrt()).abs() < 1e-6);

        let peak = profile.get(profile.duration() / 2.0);
        assert!((peak.v - 50f64.sqrt()).abs() < 1e-6);
        assert!((peak.x - 5.0).abs() < 1e-6);

        assert_eq!(profile.segments().len(), 2);

        Ok(())
    }

    #[test]
    fn test_trapezoidal_profile() -> Result<(), ProfileError> {
        let profile = generate_simple_motion_profile(&rest(0.0), &rest(10.0), 5.0, 5.0)?;

        assert_eq!(profile.segments().len(), 3);
        assert!((profile.duration() - 3.0).abs() < 1e-6);
        assert_eq!(profile.end(), profile.segments()[2].end());

        let cruise = profile.segments()[1];
        assert!((cruise.start.v - 5.0).abs() < 1e-6);
        assert_eq!(cruise.start.a, 0.0);

        // The last segment ends at the goal
        let last_end = profile.segments()[2].end();
        assert!((last_end.x - 10.0).abs() < 1e-6);
        assert!(last_end.v.abs() < 1e-6);

        Ok(())
    }

    #[test]
    fn test_backwards_goal() -> Result<(), ProfileError> {
        let profile = generate_simple_motion_profile(&rest(10.0), &rest(0.0), 5.0, 5.0)?;

        assert!(stopped_at(&profile.start(), 10.0));
        assert!(stopped_at(&profile.end(), 0.0));
        assert!((profile.duration() - 3.0).abs() < 1e-6);

        let mid = profile.get(1.5);
        assert!((mid.x - 5.0).abs() < 1e-6);
        assert!((mid.v + 5.0).abs() < 1e-6);

        Ok(())
    }

    #[test]
    fn test_nonzero_endpoint_velocities() -> Result<(), ProfileError> {
        let start = MotionState::new(0.0, 2.0, 0.0);
        let goal = MotionState::new(20.0, 1.0, 0.0);
        let constraints = SimpleMotionConstraints::new(4.0, 2.0);

        let profile = generate_motion_profile(&start, &goal, &constraints, 50)?;

        assert!((profile.get(1e-9).v - 2.0).abs() < 1e-3);
        assert!((profile.get(profile.duration() - 1e-9).v - 1.0).abs() < 1e-3);
        assert!(obeys(&profile, &constraints, 1e-6));

        Ok(())
    }

    #[test]
    fn test_unreachable_goal_velocity() -> Result<(), ProfileError> {
        let goal = MotionState::new(10.0, 10.0, 0.0);
        let constraints = SimpleMotionConstraints::new(4.0, 2.0);

        let profile = generate_motion_profile(&rest(0.0), &goal, &constraints, 10)?;

        // Arrives at the velocity limit rather than the requested velocity
        let end = profile.end();
        assert!((end.x - 10.0).abs() < 1e-6);
        assert!((end.v - 4.0).abs() < 1e-6);

        let duration = profile.duration();
        assert!((profile.get(duration - 1e-9).v - profile.get(duration).v).abs() < 1e-6);
        assert!(obeys(&profile, &constraints, 1e-6));

        Ok(())
    }

    #[test]
    fn test_asymmetric_dynamic_constraints() -> Result<(), ProfileError> {
        // A slow zone with different limits either side, so the two passes
        // split their steps at unrelated displacements
        let constraints = FnMotionConstraints(|x: f64| {
            if x < 4.0 {
                SimpleMotionConstraints::new(6.0, 3.0)
            } else if x < 5.0 {
                SimpleMotionConstraints::new(1.0, 3.0)
            } else {
                SimpleMotionConstraints::new(3.0, 3.0)
            }
        });

        let profile = generate_motion_profile(&rest(0.0), &rest(10.0), &constraints, 40)?;

        // The timed segments tile [0, 10] with continuous position and
        // velocity
        let mut x = 0.0;
        let mut v = 0.0;
        for segment in profile.segments() {
            assert!((segment.start.x - x).abs() < 1e-9);
            assert!((segment.start.v - v).abs() < 1e-6);
            let end = segment.end();
            x = end.x;
            v = end.v;
        }
        assert!((x - 10.0).abs() < 1e-6);
        assert!(v.abs() < 1e-6);

        assert!(obeys(&profile, &constraints, 1e-6));

        Ok(())
    }

    #[test]
    fn test_zero_length() -> Result<(), ProfileError> {
        let profile = generate_simple_motion_profile(&rest(3.0), &rest(3.0), 5.0, 5.0)?;

        assert_eq!(profile.duration(), 0.0);
        assert_eq!(profile.get(1.0), rest(3.0));

        Ok(())
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            generate_motion_profile(
                &rest(0.0),
                &rest(1.0),
                &SimpleMotionConstraints::new(1.0, 1.0),
                0
            ),
            Err(ProfileError::InvalidResolution)
        ));

        // Zero velocity limit can never make progress
        assert!(matches!(
            generate_simple_motion_profile(&rest(0.0), &rest(1.0), 0.0, 1.0),
            Err(ProfileError::Infeasible { .. })
        ));

        assert!(matches!(
            generate_simple_motion_profile(&rest(0.0), &rest(1.0), 1.0, 0.0),
            Err(ProfileError::InvalidConstraints { .. })
        ));
    }
}
