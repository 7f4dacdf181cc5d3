//! Pose type

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

// Internal
use super::{Angle, Vector2d};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A planar pose: position plus heading.
///
/// The same type is used for the pose derivatives (velocity, acceleration)
/// of paths and trajectories, in which case `heading` holds the angular
/// rate. Headings are in radians and are not normalised.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2d {
    pub x: f64,
    pub y: f64,

    #[serde(default)]
    pub heading: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose2d {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    /// Build a pose from a position vector and a heading.
    pub fn from_vec(pos: Vector2d, heading: f64) -> Self {
        Self::new(pos.x, pos.y, heading)
    }

    /// The position component of the pose.
    pub fn vec(&self) -> Vector2d {
        Vector2d::new(self.x, self.y)
    }

    /// Unit vector in the direction of the heading.
    pub fn heading_vec(&self) -> Vector2d {
        super::unit_from_angle(self.heading)
    }

    /// Return a copy of this pose with the heading wrapped into `(-pi, pi]`.
    pub fn normalised(&self) -> Self {
        Self::new(self.x, self.y, Angle::norm(self.heading))
    }

    /// Returns true if every component is within `epsilon` of `other`.
    pub fn approx_eq(&self, other: &Pose2d, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.heading - other.heading).abs() < epsilon
    }
}

impl Add for Pose2d {
    type Output = Pose2d;

    fn add(self, other: Pose2d) -> Pose2d {
        Pose2d::new(
            self.x + other.x,
            self.y + other.y,
            self.heading + other.heading,
        )
    }
}

impl Sub for Pose2d {
    type Output = Pose2d;

    fn sub(self, other: Pose2d) -> Pose2d {
        Pose2d::new(
            self.x - other.x,
            self.y - other.y,
            self.heading - other.heading,
        )
    }
}

impl Mul<f64> for Pose2d {
    type Output = Pose2d;

    fn mul(self, scalar: f64) -> Pose2d {
        Pose2d::new(self.x * scalar, self.y * scalar, self.heading * scalar)
    }
}

impl Div<f64> for Pose2d {
    type Output = Pose2d;

    fn div(self, scalar: f64) -> Pose2d {
        Pose2d::new(self.x / scalar, self.y / scalar, self.heading / scalar)
    }
}

impl Neg for Pose2d {
    type Output = Pose2d;

    fn neg(self) -> Pose2d {
        Pose2d::new(-self.x, -self.y, -self.heading)
    }
}
