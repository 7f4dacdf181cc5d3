//! # Heading interpolation
//!
//! Strategies defining the robot heading as a function of displacement along
//! a curve. The interpolator is bound to its curve at construction, the
//! curve itself is passed back in on each query so that no self references
//! are needed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::{curve::CurveSegment, quintic::QuinticPolynomial};
use crate::geometry::Angle;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Requested heading behaviour for a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Heading {
    /// Follow the curve tangent.
    Tangent,

    /// Hold a fixed heading.
    Constant { heading: f64 },

    /// Turn at a constant rate from `start` to `end`, taking the shorter
    /// direction.
    Linear { start: f64, end: f64 },

    /// Blend from `start` to `end` with a quintic whose end rates match the
    /// tangent heading.
    Spline { start: f64, end: f64 },
}

/// A heading interpolator bound to a particular curve.
#[derive(Debug, Clone, Copy)]
pub enum HeadingInterpolator {
    Tangent,

    Constant {
        heading: f64,
    },

    Linear {
        start: f64,
        sweep: f64,
        length: f64,
    },

    /// Quintic over the normalised displacement `u = s / length`.
    Spline {
        poly: QuinticPolynomial,
        length: f64,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl HeadingInterpolator {
    /// Bind the requested heading behaviour to the curve.
    pub fn new(heading: Heading, curve: &CurveSegment) -> Self {
        let length = curve.length();

        match heading {
            Heading::Tangent => HeadingInterpolator::Tangent,
            Heading::Constant { heading } => HeadingInterpolator::Constant { heading },
            Heading::Linear { start, end } => HeadingInterpolator::Linear {
                start,
                sweep: Angle::shortest_turn(start, end),
                length,
            },
            Heading::Spline { start, end } => {
                // Boundary rates come from the tangent heading, scaled into
                // the normalised displacement domain
                let poly = QuinticPolynomial::new(
                    start,
                    curve.tangent_angle_deriv(0.0) * length,
                    curve.tangent_angle_second_deriv(0.0) * length * length,
                    end,
                    curve.tangent_angle_deriv(length) * length,
                    curve.tangent_angle_second_deriv(length) * length * length,
                );

                HeadingInterpolator::Spline { poly, length }
            }
        }
    }

    /// Heading at displacement `s`.
    pub fn get(&self, curve: &CurveSegment, s: f64) -> f64 {
        match self {
            HeadingInterpolator::Tangent => curve.tangent_angle(s),
            HeadingInterpolator::Constant { heading } => *heading,
            HeadingInterpolator::Linear {
                start,
                sweep,
                length,
            } => start + clamp_unit(s / length) * sweep,
            HeadingInterpolator::Spline { poly, length } => poly.get(clamp_unit(s / length)),
        }
    }

    /// Heading rate with respect to displacement.
    pub fn deriv(&self, curve: &CurveSegment, s: f64) -> f64 {
        match self {
            HeadingInterpolator::Tangent => curve.tangent_angle_deriv(s),
            HeadingInterpolator::Constant { .. } => 0.0,
            HeadingInterpolator::Linear { sweep, length, .. } => sweep / length,
            HeadingInterpolator::Spline { poly, length } => {
                poly.deriv(clamp_unit(s / length)) / length
            }
        }
    }

    /// Second derivative of heading with respect to displacement.
    pub fn second_deriv(&self, curve: &CurveSegment, s: f64) -> f64 {
        match self {
            HeadingInterpolator::Tangent => curve.tangent_angle_second_deriv(s),
            HeadingInterpolator::Constant { .. } | HeadingInterpolator::Linear { .. } => 0.0,
            HeadingInterpolator::Spline { poly, length } => {
                poly.second_deriv(clamp_unit(s / length)) / (length * length)
            }
        }
    }

    /// Third derivative of heading with respect to displacement.
    pub fn third_deriv(&self, curve: &CurveSegment, s: f64) -> f64 {
        match self {
            HeadingInterpolator::Tangent => curve.tangent_angle_third_deriv(s),
            HeadingInterpolator::Constant { .. } | HeadingInterpolator::Linear { .. } => 0.0,
            HeadingInterpolator::Spline { poly, length } => {
                poly.third_deriv(clamp_unit(s / length)) / (length * length * length)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn clamp_unit(u: f64) -> f64 {
    u.max(0.0).min(1.0)
}
