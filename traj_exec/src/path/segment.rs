//! Single-curve path segment

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{
    arc_length::DEFAULT_ARC_LENGTH_SAMPLES,
    curve::{CurveSegment, Waypoint},
    heading::{Heading, HeadingInterpolator},
    PathError,
};
use crate::geometry::{Pose2d, Vector2d};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A curve paired with a heading interpolator, indexed by displacement.
///
/// A reversed segment is traversed from the curve's end to its start:
/// position and heading are mirrored in displacement and the odd
/// derivatives change sign.
#[derive(Debug, Clone)]
pub struct PathSegment {
    curve: CurveSegment,
    heading: HeadingInterpolator,
    reversed: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PathSegment {
    pub fn new(curve: CurveSegment, heading: Heading) -> Self {
        let heading = HeadingInterpolator::new(heading, &curve);

        Self {
            curve,
            heading,
            reversed: false,
        }
    }

    /// Straight line segment.
    pub fn line(start: Vector2d, end: Vector2d, heading: Heading) -> Result<Self, PathError> {
        Ok(Self::new(CurveSegment::line(start, end)?, heading))
    }

    /// Quintic spline segment using the default arc length resolution.
    pub fn spline(start: &Waypoint, end: &Waypoint, heading: Heading) -> Result<Self, PathError> {
        Ok(Self::new(
            CurveSegment::spline(start, end, DEFAULT_ARC_LENGTH_SAMPLES)?,
            heading,
        ))
    }

    /// Set whether the segment is traversed backwards along its curve.
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn curve(&self) -> &CurveSegment {
        &self.curve
    }

    pub fn length(&self) -> f64 {
        self.curve.length()
    }

    pub fn get(&self, s: f64) -> Pose2d {
        let s = self.curve_displacement(s);

        Pose2d::from_vec(self.curve.get(s), self.heading.get(&self.curve, s))
    }

    pub fn deriv(&self, s: f64) -> Pose2d {
        let s = self.curve_displacement(s);
        let deriv = Pose2d::from_vec(self.curve.deriv(s), self.heading.deriv(&self.curve, s));

        if self.reversed {
            -deriv
        } else {
            deriv
        }
    }

    pub fn second_deriv(&self, s: f64) -> Pose2d {
        let s = self.curve_displacement(s);

        Pose2d::from_vec(
            self.curve.second_deriv(s),
            self.heading.second_deriv(&self.curve, s),
        )
    }

    pub fn third_deriv(&self, s: f64) -> Pose2d {
        let s = self.curve_displacement(s);
        let deriv = Pose2d::from_vec(
            self.curve.third_deriv(s),
            self.heading.third_deriv(&self.curve, s),
        );

        if self.reversed {
            -deriv
        } else {
            deriv
        }
    }

    pub fn start(&self) -> Pose2d {
        self.get(0.0)
    }

    pub fn end(&self) -> Pose2d {
        self.get(self.length())
    }

    /// Map a displacement along this segment onto displacement along the
    /// underlying curve, clamped to the curve's length.
    fn curve_displacement(&self, s: f64) -> f64 {
        let length = self.length();
        let s = s.max(0.0).min(length);

        if self.reversed {
            length - s
        } else {
            s
        }
    }
}
