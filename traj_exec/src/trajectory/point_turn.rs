//! Turn on the spot

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::DriveConstraints;
use crate::{
    geometry::{Angle, Pose2d},
    profile::{generate_motion_profile, MotionProfile, MotionState, ProfileError},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A rotation in place, profiled over the turned angle.
#[derive(Debug, Clone)]
pub struct PointTurn {
    start: Pose2d,
    profile: MotionProfile,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PointTurn {
    /// Turn through `angle` radians from `start`, positive anticlockwise.
    ///
    /// Angles beyond half a turn are turned in full rather than wrapped.
    pub fn new(
        start: Pose2d,
        angle: f64,
        constraints: &DriveConstraints,
    ) -> Result<Self, ProfileError> {
        let profile = generate_motion_profile(
            &MotionState::new(0.0, 0.0, 0.0),
            &MotionState::new(angle, 0.0, 0.0),
            &constraints.angular(),
            1,
        )?;

        Ok(Self { start, profile })
    }

    /// Turn from `start` to face `heading`, the short way round.
    pub fn turn_to(
        start: Pose2d,
        heading: f64,
        constraints: &DriveConstraints,
    ) -> Result<Self, ProfileError> {
        Self::new(start, Angle::norm(heading - start.heading), constraints)
    }

    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    pub fn duration(&self) -> f64 {
        self.profile.duration()
    }

    pub fn get(&self, t: f64) -> Pose2d {
        Pose2d::new(
            self.start.x,
            self.start.y,
            Angle::norm(self.start.heading + self.profile.get(t).x),
        )
    }

    pub fn velocity(&self, t: f64) -> Pose2d {
        Pose2d::new(0.0, 0.0, self.profile.get(t).v)
    }

    pub fn acceleration(&self, t: f64) -> Pose2d {
        Pose2d::new(0.0, 0.0, self.profile.get(t).a)
    }
}
