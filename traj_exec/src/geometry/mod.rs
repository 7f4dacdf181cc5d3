//! # Geometry module
//!
//! Plain value types used throughout the library: 2D vectors, poses and
//! angle helpers. Poses are never normalised implicitly, use
//! [`Angle::norm`] where a wrapped heading is needed.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod angle;
mod pose;

pub use angle::Angle;
pub use pose::Pose2d;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Rotation2, Vector2};

// ---------------------------------------------------------------------------
// TYPES
// ---------------------------------------------------------------------------

/// A 2D vector, used for positions and their derivatives.
pub type Vector2d = Vector2<f64>;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Rotate a vector anticlockwise by the given angle in radians.
pub fn rotate(vec: &Vector2d, angle_rad: f64) -> Vector2d {
    Rotation2::new(angle_rad) * *vec
}

/// Angle of the vector to the positive x axis, in `(-pi, pi]`.
pub fn angle_of(vec: &Vector2d) -> f64 {
    vec.y.atan2(vec.x)
}

/// Unit vector pointing along the given angle.
pub fn unit_from_angle(angle_rad: f64) -> Vector2d {
    Vector2d::new(angle_rad.cos(), angle_rad.sin())
}
