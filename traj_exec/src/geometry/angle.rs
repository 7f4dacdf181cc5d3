//! Angle wrapping helpers

// Internal
use util::maths;

/// Namespace for angle operations on headings in radians.
pub struct Angle;

impl Angle {
    /// Wrap an angle into `(-pi, pi]`.
    pub fn norm(angle_rad: f64) -> f64 {
        maths::norm_angle(angle_rad)
    }

    /// Wrap an angle into `[0, 2pi)`.
    pub fn norm_positive(angle_rad: f64) -> f64 {
        maths::norm_angle_positive(angle_rad)
    }

    /// Signed shortest rotation taking `from` onto `to`, in `(-pi, pi]`.
    pub fn shortest_turn(from_rad: f64, to_rad: f64) -> f64 {
        Self::norm(to_rad - from_rad)
    }
}
