//! Constant control motion segment

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::MotionState;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A constant jerk (usually zero jerk) interval of duration `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionSegment {
    pub start: MotionState,
    pub dt: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MotionSegment {
    pub fn new(start: MotionState, dt: f64) -> Self {
        Self { start, dt }
    }

    /// State at time `t` into the segment.
    pub fn get(&self, t: f64) -> MotionState {
        self.start.get(t)
    }

    pub fn end(&self) -> MotionState {
        self.start.get(self.dt)
    }

    /// The same segment played backwards in time: it starts where this one
    /// ends and retraces the same positions.
    pub fn reversed(&self) -> MotionSegment {
        let end = self.end();

        MotionSegment::new(MotionState::with_jerk(end.x, -end.v, end.a, -end.j), self.dt)
    }

    pub fn flipped(&self) -> MotionSegment {
        MotionSegment::new(self.start.flipped(), self.dt)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reversed_retraces() {
        let seg = MotionSegment::new(MotionState::new(0.0, 1.0, 2.0), 1.5);
        let rev = seg.reversed();

        for i in 0..=10 {
            let t = 1.5 * i as f64 / 10.0;
            let fwd = seg.get(1.5 - t);
            let bwd = rev.get(t);

            assert!((fwd.x - bwd.x).abs() < 1e-12);
            assert!((fwd.v + bwd.v).abs() < 1e-12);
            assert!((fwd.a - bwd.a).abs() < 1e-12);
        }
    }
}
