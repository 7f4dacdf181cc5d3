//! Quintic polynomial fitting

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A scalar quintic polynomial over `t` in `[0, 1]`:
///
/// `p(t) = a*t^5 + b*t^4 + c*t^3 + d*t^2 + e*t + f`
///
/// The coefficients are fitted at construction so that the value, first and
/// second derivative match the given boundary conditions at `t = 0` and
/// `t = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuinticPolynomial {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl QuinticPolynomial {
    /// Fit a new polynomial to the boundary conditions.
    ///
    /// The boundary conditions form a fixed 6x6 linear system, its inverse is
    /// applied directly rather than solving it at runtime. The `t = 0`
    /// conditions give `f`, `e` and `d` immediately, leaving a 3x3 system in
    /// `a`, `b` and `c` for the `t = 1` conditions.
    pub fn new(
        start: f64,
        start_deriv: f64,
        start_second_deriv: f64,
        end: f64,
        end_deriv: f64,
        end_second_deriv: f64,
    ) -> Self {
        let f = start;
        let e = start_deriv;
        let d = start_second_deriv / 2.0;

        // Residuals of the end conditions once the low order terms are known
        let r0 = end - f - e - d;
        let r1 = end_deriv - e - 2.0 * d;
        let r2 = end_second_deriv - 2.0 * d;

        Self {
            a: 6.0 * r0 - 3.0 * r1 + 0.5 * r2,
            b: -15.0 * r0 + 7.0 * r1 - r2,
            c: 10.0 * r0 - 4.0 * r1 + 0.5 * r2,
            d,
            e,
            f,
        }
    }

    /// The coefficients `[a, b, c, d, e, f]`, highest order first.
    pub fn coeffs(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn get(&self, t: f64) -> f64 {
        (self.a * t + self.b) * (t * t * t * t)
            + self.c * (t * t * t)
            + self.d * (t * t)
            + self.e * t
            + self.f
    }

    pub fn deriv(&self, t: f64) -> f64 {
        (5.0 * self.a * t + 4.0 * self.b) * (t * t * t)
            + (3.0 * self.c * t + 2.0 * self.d) * t
            + self.e
    }

    pub fn second_deriv(&self, t: f64) -> f64 {
        (20.0 * self.a * t + 12.0 * self.b) * (t * t) + 6.0 * self.c * t + 2.0 * self.d
    }

    pub fn third_deriv(&self, t: f64) -> f64 {
        (60.0 * self.a * t + 24.0 * self.b) * t + 6.0 * self.c
    }

    pub fn fourth_deriv(&self, t: f64) -> f64 {
        120.0 * self.a * t + 24.0 * self.b
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_boundary_conditions() {
        let poly = QuinticPolynomial::new(1.0, -2.0, 3.0, 4.0, 5.0, -6.0);

        assert!(close(poly.get(0.0), 1.0));
        assert!(close(poly.deriv(0.0), -2.0));
        assert!(close(poly.second_deriv(0.0), 3.0));
        assert!(close(poly.get(1.0), 4.0));
        assert!(close(poly.deriv(1.0), 5.0));
        assert!(close(poly.second_deriv(1.0), -6.0));
    }

    #[test]
    fn test_linear_fit() {
        // A straight line should fit with no higher order terms
        let poly = QuinticPolynomial::new(0.0, 2.0, 0.0, 2.0, 2.0, 0.0);

        assert_eq!(poly.coeffs(), [0.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
        assert!(close(poly.get(0.25), 0.5));
        assert!(close(poly.third_deriv(0.5), 0.0));
        assert!(close(poly.fourth_deriv(0.5), 0.0));
    }

    #[test]
    fn test_derivative_chain() {
        let poly = QuinticPolynomial::new(0.0, 1.0, -1.0, 3.0, 0.0, 2.0);
        let h = 1e-5;

        for i in 1..10 {
            let t = i as f64 / 10.0;
            let num_third = (poly.second_deriv(t + h) - poly.second_deriv(t - h)) / (2.0 * h);
            let num_fourth = (poly.third_deriv(t + h) - poly.third_deriv(t - h)) / (2.0 * h);

            assert!((num_third - poly.third_deriv(t)).abs() < 1e-4);
            assert!((num_fourth - poly.fourth_deriv(t)).abs() < 1e-4);
        }
    }
}
