//! # Arc length table
//!
//! Maps a physical displacement along a parametric curve back onto the
//! curve's own parameter `t` in `[0, 1]`.
//!
//! The table is built by sampling the curve speed `|dr/dt|` at `N` equally
//! spaced parameters and integrating with the trapezoidal rule. Queries use a
//! binary search over the cumulative lengths followed by linear interpolation
//! between the two bracketing samples.
//!
//! # Accuracy
//!
//! The true displacement to parameter map is not piecewise linear, so the
//! interpolation is an approximation. The displacement error of a lookup is
//! bounded by `length / N`, the width of one table cell. The parameter map is
//! continuous and monotone non-decreasing.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::PathError;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default number of samples used when building a table.
pub const DEFAULT_ARC_LENGTH_SAMPLES: usize = 1000;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Monotone table of `(cumulative_length, t)` samples.
///
/// The first entry is `(0, 0)` and the last is `(length, 1)`. The table is
/// immutable once built.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    lengths: Vec<f64>,
    params: Vec<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArcLengthTable {
    /// Build a new table from the curve speed `|dr/dt|` using `num_samples`
    /// samples.
    ///
    /// `num_samples` must be at least 2.
    pub fn new<F>(speed: F, num_samples: usize) -> Result<Self, PathError>
    where
        F: Fn(f64) -> f64,
    {
        if num_samples < 2 {
            return Err(PathError::TooFewSamples(num_samples));
        }

        let dt = 1.0 / (num_samples - 1) as f64;

        let mut lengths = Vec::with_capacity(num_samples);
        let mut params = Vec::with_capacity(num_samples);

        lengths.push(0.0);
        params.push(0.0);

        let mut last_speed = speed(0.0);
        let mut length = 0.0;

        for i in 1..num_samples {
            // Pin the final parameter to exactly 1
            let t = if i == num_samples - 1 {
                1.0
            } else {
                i as f64 * dt
            };
            let current_speed = speed(t);

            length += 0.5 * (last_speed + current_speed) * (t - params[i - 1]);

            lengths.push(length);
            params.push(t);
            last_speed = current_speed;
        }

        Ok(Self { lengths, params })
    }

    /// Total length of the curve.
    pub fn length(&self) -> f64 {
        // Construction guarantees at least two entries
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Number of samples in the table.
    pub fn num_samples(&self) -> usize {
        self.lengths.len()
    }

    /// Get the curve parameter at the given displacement.
    ///
    /// Displacements outside `[0, length]` are clamped, a NaN displacement
    /// gives the start of the curve.
    pub fn parameter_at(&self, displacement: f64) -> f64 {
        let length = self.length();

        if !(displacement > 0.0) || !(length > 0.0) {
            return 0.0;
        }
        if displacement >= length {
            return 1.0;
        }

        // First entry with a cumulative length strictly above the query, this
        // is always in 1..len since lengths[0] = 0 <= s < length.
        let hi = self.lengths.partition_point(|&l| l <= displacement);
        let lo = hi - 1;

        let frac = (displacement - self.lengths[lo]) / (self.lengths[hi] - self.lengths[lo]);

        self.params[lo] + frac * (self.params[hi] - self.params[lo])
    }
}
