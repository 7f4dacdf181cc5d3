//! Displacement indexed profiles
//!
//! These are the working representation of the dynamic constraint generator.
//! States carry no position, segments are measured by the displacement `dx`
//! they cover rather than by time, and acceleration is constant within a
//! segment so `v(dx) = sqrt(v0^2 + 2 a dx)`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::EPSILON;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Velocity and acceleration at some displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DisplacementState {
    pub v: f64,
    pub a: f64,
}

/// Constant acceleration over a displacement `dx`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplacementSegment {
    pub start: DisplacementState,
    pub dx: f64,
}

/// Ordered displacement segments, queried by displacement.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplacementProfile {
    segments: Vec<DisplacementSegment>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DisplacementState {
    pub fn new(v: f64, a: f64) -> Self {
        Self { v, a }
    }

    /// State after covering `dx`.
    ///
    /// Velocity is clamped at zero if the deceleration would stop motion
    /// within `dx`.
    pub fn get(&self, dx: f64) -> DisplacementState {
        DisplacementState::new((self.v * self.v + 2.0 * self.a * dx).max(0.0).sqrt(), self.a)
    }

    /// Time taken to cover `dx`, or `None` if the state is at rest with no
    /// acceleration and never covers it.
    pub fn time_to(&self, dx: f64) -> Option<f64> {
        if self.a.abs() > EPSILON {
            let discriminant = (self.v * self.v + 2.0 * self.a * dx).max(0.0);
            Some((discriminant.sqrt() - self.v) / self.a)
        } else if self.v.abs() > EPSILON {
            Some(dx / self.v)
        } else {
            None
        }
    }
}

impl DisplacementSegment {
    pub fn new(start: DisplacementState, dx: f64) -> Self {
        Self { start, dx }
    }

    pub fn get(&self, x: f64) -> DisplacementState {
        self.start.get(x)
    }

    pub fn end(&self) -> DisplacementState {
        self.start.get(self.dx)
    }

    pub fn duration(&self) -> Option<f64> {
        self.start.time_to(self.dx)
    }

    /// The same segment traversed from its end, as seen walking backwards.
    pub fn reversed(&self) -> DisplacementSegment {
        let end = self.end();
        DisplacementSegment::new(DisplacementState::new(end.v, -end.a), self.dx)
    }
}

impl DisplacementProfile {
    pub fn new(segments: Vec<DisplacementSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[DisplacementSegment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<DisplacementSegment> {
        self.segments
    }

    pub fn length(&self) -> f64 {
        self.segments.iter().map(|s| s.dx).sum()
    }

    /// State at displacement `x`, clamped to `[0, length]`.
    pub fn get(&self, x: f64) -> DisplacementState {
        let mut remaining = x.max(0.0).min(self.length());

        for segment in &self.segments {
            if remaining <= segment.dx {
                return segment.get(remaining);
            }
            remaining -= segment.dx;
        }

        self.end()
    }

    pub fn start(&self) -> DisplacementState {
        self.segments.first().map(|s| s.start).unwrap_or_default()
    }

    pub fn end(&self) -> DisplacementState {
        self.segments.last().map(|s| s.end()).unwrap_or_default()
    }

    /// Reverse the walking direction of the profile, turning a pass walked
    /// back from the goal into one running forwards to it.
    pub fn reversed(&self) -> DisplacementProfile {
        DisplacementProfile::new(self.segments.iter().rev().map(|s| s.reversed()).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_state_kinematics() {
        let state = DisplacementState::new(0.0, 2.0);

        assert!((state.get(4.0).v - 4.0).abs() < 1e-12);
        assert_eq!(state.time_to(4.0), Some(2.0));

        // Stopping short clamps to rest
        assert_eq!(DisplacementState::new(1.0, -1.0).get(10.0).v, 0.0);

        assert_eq!(DisplacementState::new(2.0, 0.0).time_to(4.0), Some(2.0));
        assert_eq!(DisplacementState::new(0.0, 0.0).time_to(4.0), None);
    }

    #[test]
    fn test_reversed() {
        let profile = DisplacementProfile::new(vec![
            DisplacementSegment::new(DisplacementState::new(0.0, 2.0), 4.0),
            DisplacementSegment::new(DisplacementState::new(4.0, 0.0), 2.0),
        ]);
        let reversed = profile.reversed();

        assert!((reversed.length() - 6.0).abs() < 1e-12);
        assert_eq!(reversed.start(), DisplacementState::new(4.0, 0.0));
        assert!((reversed.get(2.0).v - 4.0).abs() < 1e-12);
        assert!(reversed.end().v.abs() < 1e-12);
    }
}
