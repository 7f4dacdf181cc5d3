//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::{Float, FloatConst};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default tolerance used for floating point comparisons.
pub const EPSILON: f64 = 1e-6;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Returns true if the two values are within `EPSILON` of each other.
pub fn epsilon_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `lhs` is much smaller than `rhs.abs()` in
/// magnitude and `lhs < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    let r = lhs % rhs;
    if r < T::zero() {
        r + rhs.abs()
    } else {
        r
    }
}

/// Wrap an angle into the range `(-pi, pi]`.
pub fn norm_angle<T>(angle: T) -> T
where
    T: Float + FloatConst,
{
    let tau = T::PI() + T::PI();
    let wrapped = rem_euclid(angle, tau);

    if wrapped > T::PI() {
        wrapped - tau
    } else {
        wrapped
    }
}

/// Wrap an angle into the range `[0, 2pi)`.
pub fn norm_angle_positive<T>(angle: T) -> T
where
    T: Float + FloatConst,
{
    let tau = T::PI() + T::PI();
    let wrapped = rem_euclid(angle, tau);

    // Rounding in rem_euclid can land exactly on tau
    if wrapped >= tau {
        T::zero()
    } else {
        wrapped
    }
}

/// Returns the real solutions to `a*x^2 + b*x + c = 0`.
///
/// If `a` is negligible the linear solution is returned. A repeated root is
/// only returned once and no roots are returned if the discriminant is
/// negative.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    if epsilon_eq(a, 0.0) {
        return vec![-c / b];
    }

    let disc = b * b - 4.0 * a * c;

    if epsilon_eq(disc, 0.0) {
        vec![-b / (2.0 * a)]
    } else if disc > 0.0 {
        vec![
            (-b + disc.sqrt()) / (2.0 * a),
            (-b - disc.sqrt()) / (2.0 * a),
        ]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PI: f64 = std::f64::consts::PI;
    const TAU: f64 = std::f64::consts::TAU;

    #[test]
    fn test_norm_angle() {
        assert!(epsilon_eq(norm_angle(0.0), 0.0));
        assert!(epsilon_eq(norm_angle(PI), PI));
        assert!(epsilon_eq(norm_angle(-PI), PI));
        assert!(epsilon_eq(norm_angle(TAU + 1.0), 1.0));
        assert!(epsilon_eq(norm_angle(-1.0), -1.0));
        assert!(epsilon_eq(norm_angle(3.0 * PI / 2.0), -PI / 2.0));
    }

    #[test]
    fn test_norm_angle_positive() {
        assert!(epsilon_eq(norm_angle_positive(-1.0), TAU - 1.0));
        assert!(epsilon_eq(norm_angle_positive(TAU), 0.0));
        assert!(epsilon_eq(norm_angle_positive(1.0), 1.0));
    }

    #[test]
    fn test_solve_quadratic() {
        let mut roots = solve_quadratic(1.0, -3.0, 2.0);
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(roots.len(), 2);
        assert!(epsilon_eq(roots[0], 1.0));
        assert!(epsilon_eq(roots[1], 2.0));

        assert_eq!(solve_quadratic(1.0, 2.0, 1.0), vec![-1.0]);
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());
        assert_eq!(solve_quadratic(0.0, 2.0, -4.0), vec![2.0]);
    }
}
