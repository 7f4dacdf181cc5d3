//! # Curve segments
//!
//! Parametric curves over `t` in `[0, 1]` and their displacement-indexed
//! wrapper, [`CurveSegment`].
//!
//! All displacement derivatives are obtained from the parametric ones by the
//! chain rule through `t(s)`:
//!
//! - `dr/ds = r' t_s`
//! - `d2r/ds2 = r'' t_s^2 + r' t_ss`
//! - `d3r/ds3 = r''' t_s^3 + 3 r'' t_s t_ss + r' t_sss`
//!
//! where `'` denotes differentiation by `t` and `t_s = 1 / |r'|`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::{arc_length::ArcLengthTable, quintic::QuinticPolynomial, PathError};
use crate::geometry::{self, Pose2d, Vector2d};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Squared tangent magnitudes below this are treated as a cusp.
const DEGENERATE_TANGENT_SQ: f64 = 1e-12;

/// Lengths below this are rejected when building a segment.
const MIN_SEGMENT_LENGTH: f64 = 1e-9;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A position with first and second derivatives along each axis, used as a
/// spline knot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,

    #[serde(default)]
    pub dx: f64,
    #[serde(default)]
    pub dy: f64,

    #[serde(default)]
    pub d2x: f64,
    #[serde(default)]
    pub d2y: f64,
}

/// A quintic spline between two waypoints, parameterised by `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuinticSpline {
    x: QuinticPolynomial,
    y: QuinticPolynomial,
}

/// A straight line between two points, parameterised by `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LineSegment {
    start: Vector2d,
    end: Vector2d,
}

/// A curve indexed by displacement `s` in `[0, length]`.
///
/// Splines carry an [`ArcLengthTable`] to map `s` to `t`, lines use the
/// closed form `t = s / length`.
#[derive(Debug, Clone)]
pub enum CurveSegment {
    Spline {
        spline: QuinticSpline,
        table: ArcLengthTable,
    },
    Line(LineSegment),
}

/// Parametric derivatives of a curve at a single `t`.
#[derive(Debug, Clone, Copy)]
struct ParamDerivs {
    d1: Vector2d,
    d2: Vector2d,
    d3: Vector2d,
    d4: Vector2d,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Waypoint {
    pub fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self {
            x,
            y,
            dx,
            dy,
            ..Default::default()
        }
    }

    pub fn with_second_deriv(mut self, d2x: f64, d2y: f64) -> Self {
        self.d2x = d2x;
        self.d2y = d2y;
        self
    }

    /// Waypoint at the pose position, with the first derivative pointing
    /// along the pose heading with the given magnitude and no second
    /// derivative.
    pub fn from_pose(pose: &Pose2d, deriv_mag: f64) -> Self {
        let deriv = pose.heading_vec() * deriv_mag;
        Self::new(pose.x, pose.y, deriv.x, deriv.y)
    }

    pub fn pos(&self) -> Vector2d {
        Vector2d::new(self.x, self.y)
    }
}

impl QuinticSpline {
    pub fn new(start: &Waypoint, end: &Waypoint) -> Self {
        Self {
            x: QuinticPolynomial::new(start.x, start.dx, start.d2x, end.x, end.dx, end.d2x),
            y: QuinticPolynomial::new(start.y, start.dy, start.d2y, end.y, end.dy, end.d2y),
        }
    }

    pub fn get(&self, t: f64) -> Vector2d {
        Vector2d::new(self.x.get(t), self.y.get(t))
    }

    pub fn deriv(&self, t: f64) -> Vector2d {
        Vector2d::new(self.x.deriv(t), self.y.deriv(t))
    }

    pub fn second_deriv(&self, t: f64) -> Vector2d {
        Vector2d::new(self.x.second_deriv(t), self.y.second_deriv(t))
    }

    pub fn third_deriv(&self, t: f64) -> Vector2d {
        Vector2d::new(self.x.third_deriv(t), self.y.third_deriv(t))
    }

    pub fn fourth_deriv(&self, t: f64) -> Vector2d {
        Vector2d::new(self.x.fourth_deriv(t), self.y.fourth_deriv(t))
    }
}

impl LineSegment {
    pub fn new(start: Vector2d, end: Vector2d) -> Self {
        Self { start, end }
    }

    pub fn get(&self, t: f64) -> Vector2d {
        self.start + (self.end - self.start) * t
    }

    pub fn deriv(&self, _t: f64) -> Vector2d {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

impl CurveSegment {
    /// Fit a quintic spline between the two waypoints and build its arc
    /// length table with the given number of samples.
    pub fn spline(start: &Waypoint, end: &Waypoint, num_samples: usize) -> Result<Self, PathError> {
        let spline = QuinticSpline::new(start, end);
        let table = ArcLengthTable::new(|t| spline.deriv(t).norm(), num_samples)?;

        if table.length() < MIN_SEGMENT_LENGTH {
            return Err(PathError::ZeroLength);
        }

        Ok(CurveSegment::Spline { spline, table })
    }

    /// Straight line between two points.
    pub fn line(start: Vector2d, end: Vector2d) -> Result<Self, PathError> {
        let line = LineSegment::new(start, end);

        if line.length() < MIN_SEGMENT_LENGTH {
            return Err(PathError::ZeroLength);
        }

        Ok(CurveSegment::Line(line))
    }

    pub fn length(&self) -> f64 {
        match self {
            CurveSegment::Spline { table, .. } => table.length(),
            CurveSegment::Line(line) => line.length(),
        }
    }

    /// Curve parameter at the given displacement, clamped to `[0, 1]`.
    pub fn parameter_at(&self, s: f64) -> f64 {
        match self {
            CurveSegment::Spline { table, .. } => table.parameter_at(s),
            CurveSegment::Line(line) => (s / line.length()).max(0.0).min(1.0),
        }
    }

    /// Position at parameter `t`.
    pub fn get_at_param(&self, t: f64) -> Vector2d {
        match self {
            CurveSegment::Spline { spline, .. } => spline.get(t),
            CurveSegment::Line(line) => line.get(t),
        }
    }

    /// First derivative with respect to the parameter `t`.
    pub fn deriv_at_param(&self, t: f64) -> Vector2d {
        self.param_derivs(t).d1
    }

    /// Second derivative with respect to the parameter `t`.
    pub fn second_deriv_at_param(&self, t: f64) -> Vector2d {
        self.param_derivs(t).d2
    }

    /// Third derivative with respect to the parameter `t`.
    pub fn third_deriv_at_param(&self, t: f64) -> Vector2d {
        self.param_derivs(t).d3
    }

    // ---- DISPLACEMENT DOMAIN ----

    pub fn get(&self, s: f64) -> Vector2d {
        self.get_at_param(self.parameter_at(s))
    }

    pub fn deriv(&self, s: f64) -> Vector2d {
        let t = self.parameter_at(s);
        let p = self.param_derivs(t);
        let (t_s, _, _) = param_maps(&p);

        p.d1 * t_s
    }

    pub fn second_deriv(&self, s: f64) -> Vector2d {
        let t = self.parameter_at(s);
        let p = self.param_derivs(t);
        let (t_s, t_ss, _) = param_maps(&p);

        p.d2 * (t_s * t_s) + p.d1 * t_ss
    }

    pub fn third_deriv(&self, s: f64) -> Vector2d {
        let t = self.parameter_at(s);
        let p = self.param_derivs(t);
        let (t_s, t_ss, t_sss) = param_maps(&p);

        p.d3 * (t_s * t_s * t_s) + p.d2 * (3.0 * t_s * t_ss) + p.d1 * t_sss
    }

    /// `dt/ds` at the given displacement.
    pub fn parameter_deriv(&self, s: f64) -> f64 {
        param_maps(&self.param_derivs(self.parameter_at(s))).0
    }

    /// `d2t/ds2` at the given displacement.
    pub fn parameter_second_deriv(&self, s: f64) -> f64 {
        param_maps(&self.param_derivs(self.parameter_at(s))).1
    }

    /// `d3t/ds3` at the given displacement.
    pub fn parameter_third_deriv(&self, s: f64) -> f64 {
        param_maps(&self.param_derivs(self.parameter_at(s))).2
    }

    // ---- TANGENT ANGLE ----

    /// Angle of the curve tangent to the positive x axis.
    pub fn tangent_angle(&self, s: f64) -> f64 {
        geometry::angle_of(&self.deriv_at_param(self.parameter_at(s)))
    }

    /// Derivative of the tangent angle with respect to displacement, which is
    /// the signed curvature.
    ///
    /// Returns 0 at a cusp where the tangent vanishes.
    pub fn tangent_angle_deriv(&self, s: f64) -> f64 {
        let p = self.param_derivs(self.parameter_at(s));
        let (t_s, _, _) = param_maps(&p);

        tangent_param_derivs(&p).0 * t_s
    }

    /// Second derivative of the tangent angle with respect to displacement.
    ///
    /// Returns 0 at a cusp where the tangent vanishes.
    pub fn tangent_angle_second_deriv(&self, s: f64) -> f64 {
        let p = self.param_derivs(self.parameter_at(s));
        let (t_s, t_ss, _) = param_maps(&p);
        let (phi_t, phi_tt, _) = tangent_param_derivs(&p);

        phi_tt * t_s * t_s + phi_t * t_ss
    }

    /// Third derivative of the tangent angle with respect to displacement.
    ///
    /// Returns 0 at a cusp where the tangent vanishes.
    pub fn tangent_angle_third_deriv(&self, s: f64) -> f64 {
        let p = self.param_derivs(self.parameter_at(s));
        let (t_s, t_ss, t_sss) = param_maps(&p);
        let (phi_t, phi_tt, phi_ttt) = tangent_param_derivs(&p);

        phi_ttt * t_s * t_s * t_s + 3.0 * phi_tt * t_s * t_ss + phi_t * t_sss
    }

    fn param_derivs(&self, t: f64) -> ParamDerivs {
        match self {
            CurveSegment::Spline { spline, .. } => ParamDerivs {
                d1: spline.deriv(t),
                d2: spline.second_deriv(t),
                d3: spline.third_deriv(t),
                d4: spline.fourth_deriv(t),
            },
            CurveSegment::Line(line) => ParamDerivs {
                d1: line.deriv(t),
                d2: Vector2d::zeros(),
                d3: Vector2d::zeros(),
                d4: Vector2d::zeros(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Derivatives of the parameter with respect to displacement,
/// `(t_s, t_ss, t_sss)`.
///
/// These are all zero at a cusp.
fn param_maps(p: &ParamDerivs) -> (f64, f64, f64) {
    let d = p.d1.norm_squared();

    if d < DEGENERATE_TANGENT_SQ {
        return (0.0, 0.0, 0.0);
    }

    let r1_r2 = p.d1.dot(&p.d2);
    let t_s = 1.0 / d.sqrt();
    let t_ss = -r1_r2 / (d * d);
    let t_sss = (-(p.d2.norm_squared() + p.d1.dot(&p.d3)) / (d * d)
        + 4.0 * r1_r2 * r1_r2 / (d * d * d))
        * t_s;

    (t_s, t_ss, t_sss)
}

/// Derivatives of the tangent angle `atan2(y', x')` with respect to the
/// parameter, `(phi_t, phi_tt, phi_ttt)`.
///
/// With `n = x'y'' - x''y'` and `d = |r'|^2`, `phi_t = n / d`. All three are
/// zero at a cusp.
fn tangent_param_derivs(p: &ParamDerivs) -> (f64, f64, f64) {
    let d = p.d1.norm_squared();

    if d < DEGENERATE_TANGENT_SQ {
        return (0.0, 0.0, 0.0);
    }

    let n = p.d1.perp(&p.d2);
    let n_t = p.d1.perp(&p.d3);
    let n_tt = p.d2.perp(&p.d3) + p.d1.perp(&p.d4);

    let d_t = 2.0 * p.d1.dot(&p.d2);
    let d_tt = 2.0 * (p.d2.norm_squared() + p.d1.dot(&p.d3));

    let phi_t = n / d;
    let phi_tt = n_t / d - n * d_t / (d * d);
    let phi_ttt = n_tt / d - 2.0 * n_t * d_t / (d * d) - n * d_tt / (d * d)
        + 2.0 * n * d_t * d_t / (d * d * d);

    (phi_t, phi_tt, phi_ttt)
}
