//! Motion constraints

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Displacement dependent velocity and acceleration limits.
///
/// Implementations must be deterministic pure functions of the displacement.
pub trait MotionConstraints {
    /// The limits at displacement `x`.
    fn get(&self, x: f64) -> SimpleMotionConstraints;

    fn max_velocity(&self, x: f64) -> f64 {
        self.get(x).max_vel
    }

    fn max_acceleration(&self, x: f64) -> f64 {
        self.get(x).max_accel
    }
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Constant velocity and acceleration limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleMotionConstraints {
    /// Maximum velocity
    pub max_vel: f64,

    /// Maximum acceleration, applied to both speeding up and slowing down
    pub max_accel: f64,
}

/// Constraints given by a closure of the displacement.
pub struct FnMotionConstraints<F>(pub F)
where
    F: Fn(f64) -> SimpleMotionConstraints;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimpleMotionConstraints {
    pub fn new(max_vel: f64, max_accel: f64) -> Self {
        Self { max_vel, max_accel }
    }
}

impl MotionConstraints for SimpleMotionConstraints {
    fn get(&self, _x: f64) -> SimpleMotionConstraints {
        *self
    }
}

impl<F> MotionConstraints for FnMotionConstraints<F>
where
    F: Fn(f64) -> SimpleMotionConstraints,
{
    fn get(&self, x: f64) -> SimpleMotionConstraints {
        (self.0)(x)
    }
}
