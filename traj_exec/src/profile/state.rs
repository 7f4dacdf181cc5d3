//! 1D kinematic state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Kinematic state along a single axis, which may be a path displacement or
/// a turn angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Position
    pub x: f64,

    /// Velocity
    #[serde(default)]
    pub v: f64,

    /// Acceleration
    #[serde(default)]
    pub a: f64,

    /// Jerk, zero for constant acceleration motion
    #[serde(default)]
    pub j: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MotionState {
    pub fn new(x: f64, v: f64, a: f64) -> Self {
        Self { x, v, a, j: 0.0 }
    }

    pub fn with_jerk(x: f64, v: f64, a: f64, j: f64) -> Self {
        Self { x, v, a, j }
    }

    /// Advance the state by `dt` assuming constant jerk.
    pub fn get(&self, dt: f64) -> MotionState {
        let dt2 = dt * dt;

        MotionState {
            x: self.x + self.v * dt + self.a / 2.0 * dt2 + self.j / 6.0 * dt2 * dt,
            v: self.v + self.a * dt + self.j / 2.0 * dt2,
            a: self.a + self.j * dt,
            j: self.j,
        }
    }

    /// The same motion mirrored about the origin.
    pub fn flipped(&self) -> MotionState {
        MotionState::with_jerk(-self.x, -self.v, -self.a, -self.j)
    }

    /// Returns true if position, velocity and acceleration are all within
    /// `epsilon` of `other`.
    pub fn approx_eq(&self, other: &MotionState, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.v - other.v).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }
}
