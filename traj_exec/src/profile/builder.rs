//! Incremental motion profile construction

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{MotionProfile, MotionSegment, MotionState};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Builds a motion profile by appending constant control segments, each
/// starting from where the previous one ended.
#[derive(Debug, Clone)]
pub struct MotionProfileBuilder {
    start: MotionState,
    current: MotionState,
    segments: Vec<MotionSegment>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MotionProfileBuilder {
    pub fn new(start: MotionState) -> Self {
        Self {
            start,
            current: start,
            segments: Vec::new(),
        }
    }

    /// Append a segment holding the given jerk for `dt`. Acceleration is
    /// continuous across the join.
    pub fn append_jerk_control(self, jerk: f64, dt: f64) -> Self {
        let state = MotionState::with_jerk(self.current.x, self.current.v, self.current.a, jerk);
        self.push(state, dt)
    }

    /// Append a segment holding the given acceleration for `dt`.
    pub fn append_acceleration_control(self, accel: f64, dt: f64) -> Self {
        let state = MotionState::new(self.current.x, self.current.v, accel);
        self.push(state, dt)
    }

    /// Replay the controls of every segment in `profile` from the current
    /// state.
    pub fn append_profile(mut self, profile: &MotionProfile) -> Self {
        for segment in profile.segments() {
            let state = MotionState::with_jerk(
                self.current.x,
                self.current.v,
                segment.start.a,
                segment.start.j,
            );
            self = self.push(state, segment.dt);
        }
        self
    }

    /// The state the next appended segment will start from.
    pub fn current(&self) -> MotionState {
        self.current
    }

    pub fn build(self) -> MotionProfile {
        MotionProfile::with_boundaries(self.segments, self.start, self.current)
    }

    fn push(mut self, state: MotionState, dt: f64) -> Self {
        let segment = MotionSegment::new(state, dt);
        self.current = segment.end();
        self.segments.push(segment);
        self
    }
}
