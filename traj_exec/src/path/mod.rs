//! # Path module
//!
//! Geometric paths indexed by displacement.
//!
//! A path is built bottom up:
//!
//! - [`QuinticPolynomial`] fits a scalar polynomial to value, rate and
//!   acceleration at both ends of `t` in `[0, 1]`.
//! - [`CurveSegment`] pairs two polynomials (or a straight line) into a 2D
//!   curve and reparameterises it by arc length using an [`ArcLengthTable`].
//! - [`HeadingInterpolator`] defines the heading along the curve.
//! - [`PathSegment`] combines a curve and heading into a pose function of
//!   displacement, optionally traversed in reverse.
//! - [`Path`] concatenates segments and dispatches queries by cumulative
//!   length.
//!
//! All queries clamp the displacement to `[0, length]` and never fail.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod arc_length;
pub mod curve;
pub mod heading;
pub mod quintic;
mod segment;

pub use arc_length::ArcLengthTable;
pub use curve::{CurveSegment, LineSegment, QuinticSpline, Waypoint};
pub use heading::{Heading, HeadingInterpolator};
pub use quintic::QuinticPolynomial;
pub use segment::PathSegment;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use thiserror::Error;

use crate::geometry::Pose2d;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A composite path made of one or more segments joined end to end.
#[derive(Debug, Clone)]
pub struct Path {
    segments: Vec<PathSegment>,
    length: f64,
}

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// Errors raised while constructing paths.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("At least 2 waypoints are needed to fit a spline, found {0}")]
    TooFewWaypoints(usize),

    #[error("An arc length table needs at least 2 samples, found {0}")]
    TooFewSamples(usize),

    #[error("Path segments must have a non-zero length")]
    ZeroLength,

    #[error("Attempted to create a path with no segments")]
    EmptyPath,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Path {
    /// Create a new path from a non-empty list of segments.
    pub fn new(segments: Vec<PathSegment>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::EmptyPath);
        }

        let length = segments.iter().map(|s| s.length()).sum();

        Ok(Self { segments, length })
    }

    /// Fit a spline through each consecutive pair of waypoints, all sharing
    /// the same heading behaviour.
    pub fn spline_through(waypoints: &[Waypoint], heading: Heading) -> Result<Self, PathError> {
        if waypoints.len() < 2 {
            return Err(PathError::TooFewWaypoints(waypoints.len()));
        }

        let segments = waypoints
            .windows(2)
            .map(|w| PathSegment::spline(&w[0], &w[1], heading))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(segments)
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn get(&self, s: f64) -> Pose2d {
        let (segment, s) = self.dispatch(s);
        segment.get(s)
    }

    pub fn deriv(&self, s: f64) -> Pose2d {
        let (segment, s) = self.dispatch(s);
        segment.deriv(s)
    }

    pub fn second_deriv(&self, s: f64) -> Pose2d {
        let (segment, s) = self.dispatch(s);
        segment.second_deriv(s)
    }

    pub fn third_deriv(&self, s: f64) -> Pose2d {
        let (segment, s) = self.dispatch(s);
        segment.third_deriv(s)
    }

    pub fn start(&self) -> Pose2d {
        self.get(0.0)
    }

    pub fn end(&self) -> Pose2d {
        self.get(self.length)
    }

    pub fn end_deriv(&self) -> Pose2d {
        self.deriv(self.length)
    }

    pub fn end_second_deriv(&self) -> Pose2d {
        self.second_deriv(self.length)
    }

    /// Find the segment containing displacement `s` and the displacement
    /// within that segment.
    ///
    /// Overshooting the last segment through rounding returns the end of the
    /// last segment.
    fn dispatch(&self, s: f64) -> (&PathSegment, f64) {
        let mut remaining = s.max(0.0).min(self.length);

        for segment in &self.segments {
            if remaining <= segment.length() {
                return (segment, remaining);
            }
            remaining -= segment.length();
        }

        // The constructor guarantees at least one segment
        let last = &self.segments[self.segments.len() - 1];
        (last, last.length())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::Vector2d;

    #[test]
    fn test_composite_dispatch() -> Result<(), PathError> {
        let path = Path::new(vec![
            PathSegment::line(Vector2d::new(0.0, 0.0), Vector2d::new(3.0, 0.0), Heading::Tangent)?,
            PathSegment::line(Vector2d::new(3.0, 0.0), Vector2d::new(3.0, 4.0), Heading::Tangent)?,
        ])?;

        assert!((path.length() - 7.0).abs() < 1e-12);
        assert!(path.get(1.0).approx_eq(&Pose2d::new(1.0, 0.0, 0.0), 1e-12));
        assert!(path
            .get(5.0)
            .approx_eq(&Pose2d::new(3.0, 2.0, std::f64::consts::FRAC_PI_2), 1e-12));

        // Clamped at both ends
        assert!(path.get(-1.0).approx_eq(&path.start(), 1e-12));
        assert!(path.get(100.0).approx_eq(&Pose2d::new(3.0, 4.0, std::f64::consts::FRAC_PI_2), 1e-12));

        Ok(())
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(Path::new(Vec::new()), Err(PathError::EmptyPath)));
        assert!(matches!(
            Path::spline_through(&[Waypoint::new(0.0, 0.0, 1.0, 0.0)], Heading::Tangent),
            Err(PathError::TooFewWaypoints(1))
        ));
    }

    #[test]
    fn test_spline_through_is_continuous() -> Result<(), PathError> {
        let path = Path::spline_through(
            &[
                Waypoint::new(0.0, 0.0, 10.0, 0.0),
                Waypoint::new(10.0, 5.0, 10.0, 5.0),
                Waypoint::new(20.0, 0.0, 10.0, -5.0),
            ],
            Heading::Tangent,
        )?;

        assert_eq!(path.segments().len(), 2);

        // Position and heading match either side of the joint
        let joint = path.segments()[0].length();
        let before = path.get(joint - 1e-6);
        let after = path.get(joint + 1e-6);
        assert!(before.approx_eq(&after, 1e-4));

        Ok(())
    }
}
