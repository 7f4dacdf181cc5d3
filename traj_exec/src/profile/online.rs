//! # Online motion profiles
//!
//! An online profile does not plan the whole motion up front. Each control
//! cycle it is asked for a velocity at the measured displacement and picks the
//! highest velocity that:
//!
//! - can be reached from the last commanded velocity within the acceleration
//!   limit over the elapsed time,
//! - still allows stopping at the goal,
//! - is within the velocity limit at this displacement,
//! - is below an optional precomputed backward pass, so that slow zones
//!   ahead are entered at a safe speed.
//!
//! The profile is stateful: it remembers the last velocity and the time it
//! was commanded, which [`OnlineMotionProfile::update`] sets. It is meant to
//! be owned by a single control loop and must not be shared between threads
//! without external synchronisation.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::time::Instant;

// Internal
use super::{
    generate_backward_pass, DisplacementProfile, DisplacementState, MotionConstraints,
    ProfileError, SimpleMotionConstraints, EPSILON,
};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Source of monotonic time in seconds.
pub trait Clock {
    fn seconds(&self) -> f64;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Clock measuring seconds since it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

/// Velocity limited online profile over `[0, length]`.
pub struct OnlineMotionProfile<M, C = SystemClock>
where
    M: MotionConstraints,
    C: Clock,
{
    goal: DisplacementState,
    length: f64,
    base_constraints: M,
    clock: C,
    backward_pass: Option<DisplacementProfile>,

    last_velocity: f64,
    last_timestamp: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

impl<M, C> OnlineMotionProfile<M, C>
where
    M: MotionConstraints,
    C: Clock,
{
    /// Create a new online profile with no backward pass.
    ///
    /// The last velocity is initialised to the start velocity and the last
    /// timestamp to the current clock time.
    pub fn new(
        start: DisplacementState,
        goal: DisplacementState,
        length: f64,
        base_constraints: M,
        clock: C,
    ) -> Self {
        let last_timestamp = clock.seconds();

        Self {
            goal,
            length,
            base_constraints,
            clock,
            backward_pass: None,
            last_velocity: start.v,
            last_timestamp,
        }
    }

    /// Limit velocities by the given backward pass.
    pub fn with_backward_pass(mut self, backward_pass: DisplacementProfile) -> Self {
        self.backward_pass = Some(backward_pass);
        self
    }

    /// Velocity and numerical acceleration to command at `displacement`,
    /// using the base constraints.
    ///
    /// `error` is an additional distance to keep the ability to stop within,
    /// for use when tracking multiple axes. This does not change the internal
    /// state, call [`update`](Self::update) with the velocity actually used.
    pub fn get(&self, displacement: f64, error: f64) -> DisplacementState {
        let constraints = self.base_constraints.get(displacement);
        self.get_with_constraints(displacement, error, constraints)
    }

    /// As [`get`](Self::get) but overriding the constraints for this cycle.
    pub fn get_with_constraints(
        &self,
        displacement: f64,
        error: f64,
        constraints: SimpleMotionConstraints,
    ) -> DisplacementState {
        let dt = self.clock.seconds() - self.last_timestamp;
        let remaining = (self.length - displacement).abs().max(error.abs());

        let max_vel_to_stop = (2.0 * constraints.max_accel * remaining).sqrt() + self.goal.v;
        let max_vel_from_last = self.last_velocity + constraints.max_accel * dt;

        let mut velocity = max_vel_from_last
            .min(max_vel_to_stop)
            .min(constraints.max_vel);

        if let Some(ref backward_pass) = self.backward_pass {
            velocity = velocity.min(backward_pass.get(displacement).v);
        }

        let accel = if dt > EPSILON {
            (velocity - self.last_velocity) / dt
        } else {
            0.0
        };

        DisplacementState::new(velocity, accel)
    }

    /// Record the velocity commanded this cycle at the current clock time.
    pub fn update(&mut self, velocity: f64) {
        let timestamp = self.clock.seconds();
        self.update_at(velocity, timestamp);
    }

    /// Record the velocity commanded at `timestamp`.
    pub fn update_at(&mut self, velocity: f64, timestamp: f64) {
        self.last_velocity = velocity;
        self.last_timestamp = timestamp;
    }

    pub fn last_velocity(&self) -> f64 {
        self.last_velocity
    }

    pub fn length(&self) -> f64 {
        self.length
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Create an online profile whose velocity is limited by a backward pass over
/// the constraints.
///
/// The backward pass starts from the velocity limit at the end of the range
/// rather than the goal, as the online profile already handles stopping at
/// the goal.
pub fn generate_online_motion_profile<M, C>(
    start: DisplacementState,
    goal: DisplacementState,
    length: f64,
    constraints: M,
    clock: C,
    resolution: usize,
) -> Result<OnlineMotionProfile<M, C>, ProfileError>
where
    M: MotionConstraints,
    C: Clock,
{
    let backward_pass = generate_backward_pass(length, &|s| constraints.get(s), resolution)?;

    Ok(OnlineMotionProfile::new(start, goal, length, constraints, clock)
        .with_backward_pass(backward_pass))
}
