//! Time indexed motion profile

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::{MotionProfileBuilder, MotionSegment, MotionState};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An ordered sequence of motion segments, queried by time.
///
/// The profile stores its boundary states explicitly. Queries at or before
/// time 0 return `start`, queries at or after the duration return `end`.
/// Generated profiles take these from the first and last segment, so they
/// always describe a state the motion passes through.
#[derive(Debug, Clone, Serialize)]
pub struct MotionProfile {
    segments: Vec<MotionSegment>,
    start: MotionState,
    end: MotionState,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MotionProfile {
    /// Build a profile from segments, with boundary states taken from the
    /// first and last segment.
    ///
    /// An empty profile rests at the default state.
    pub fn new(segments: Vec<MotionSegment>) -> Self {
        let start = segments.first().map(|s| s.start).unwrap_or_default();
        let end = segments.last().map(|s| s.end()).unwrap_or(start);

        Self {
            segments,
            start,
            end,
        }
    }

    /// Build a profile with explicit boundary states.
    pub fn with_boundaries(
        segments: Vec<MotionSegment>,
        start: MotionState,
        end: MotionState,
    ) -> Self {
        Self {
            segments,
            start,
            end,
        }
    }

    /// A profile of zero duration resting at the given state.
    pub fn stationary(state: MotionState) -> Self {
        Self::with_boundaries(Vec::new(), state, state)
    }

    pub fn segments(&self) -> &[MotionSegment] {
        &self.segments
    }

    pub fn duration(&self) -> f64 {
        self.segments.iter().map(|s| s.dt).sum()
    }

    pub fn start(&self) -> MotionState {
        self.start
    }

    pub fn end(&self) -> MotionState {
        self.end
    }

    /// Get the state at time `t`, clamped to `[0, duration]`.
    pub fn get(&self, t: f64) -> MotionState {
        if t <= 0.0 {
            return self.start;
        }
        if t >= self.duration() {
            return self.end;
        }

        let mut remaining = t;
        for segment in &self.segments {
            if remaining <= segment.dt {
                return segment.get(remaining);
            }
            remaining -= segment.dt;
        }

        self.end
    }

    /// The profile played backwards in time, tracing the same positions from
    /// the end back to the start with negated velocity.
    pub fn reversed(&self) -> MotionProfile {
        let reverse_state = |s: &MotionState| MotionState::with_jerk(s.x, -s.v, s.a, -s.j);

        MotionProfile::with_boundaries(
            self.segments.iter().rev().map(|s| s.reversed()).collect(),
            reverse_state(&self.end),
            reverse_state(&self.start),
        )
    }

    /// The profile mirrored about the origin.
    pub fn flipped(&self) -> MotionProfile {
        MotionProfile::with_boundaries(
            self.segments.iter().map(|s| s.flipped()).collect(),
            self.start.flipped(),
            self.end.flipped(),
        )
    }

    /// Concatenate another profile onto the end of this one.
    ///
    /// The other profile's controls are replayed from this profile's end
    /// state, so position and velocity stay continuous.
    pub fn append(&self, other: &MotionProfile) -> MotionProfile {
        MotionProfileBuilder::new(self.start)
            .append_profile(self)
            .append_profile(other)
            .build()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_profile() -> MotionProfile {
        MotionProfileBuilder::new(MotionState::new(1.0, 0.0, 0.0))
            .append_acceleration_control(2.0, 1.0)
            .append_acceleration_control(0.0, 2.0)
            .append_acceleration_control(-2.0, 1.0)
            .build()
    }

    #[test]
    fn test_get_and_clamp() {
        let profile = test_profile();

        assert!((profile.duration() - 4.0).abs() < 1e-12);
        assert!(profile.get(0.5).approx_eq(&MotionState::new(1.25, 1.0, 2.0), 1e-12));
        assert!(profile.get(2.0).approx_eq(&MotionState::new(4.0, 2.0, 0.0), 1e-12));

        assert_eq!(profile.get(-1.0), profile.start());
        assert_eq!(profile.get(10.0), profile.end());
        assert!((profile.end().x - 7.0).abs() < 1e-12);
        assert!(profile.end().v.abs() < 1e-12);
    }

    #[test]
    fn test_reversed_twice() {
        let profile = test_profile();
        let twice = profile.reversed().reversed();

        assert!((twice.duration() - profile.duration()).abs() < 1e-12);

        for i in 0..=40 {
            let t = profile.duration() * i as f64 / 40.0;
            assert!(twice.get(t).approx_eq(&profile.get(t), 1e-9));
        }
    }

    #[test]
    fn test_reversed_traces_backwards() {
        let profile = test_profile();
        let reversed = profile.reversed();
        let duration = profile.duration();

        for i in 0..=40 {
            let t = duration * i as f64 / 40.0;
            let fwd = profile.get(duration - t);
            let bwd = reversed.get(t);

            assert!((fwd.x - bwd.x).abs() < 1e-9);
            assert!((fwd.v + bwd.v).abs() < 1e-9);
        }
    }

    #[test]
    fn test_append() {
        let profile = test_profile();
        let joined = profile.append(&profile);

        assert!((joined.duration() - 8.0).abs() < 1e-12);
        assert!((joined.end().x - 13.0).abs() < 1e-9);
        assert!(joined.get(4.0).approx_eq(&profile.end(), 1e-9));
    }

    #[test]
    fn test_stationary() {
        let state = MotionState::new(3.0, 0.0, 0.0);
        let profile = MotionProfile::stationary(state);

        assert_eq!(profile.duration(), 0.0);
        assert_eq!(profile.get(1.0), state);
        assert_eq!(profile.get(-1.0), state);
    }
}
