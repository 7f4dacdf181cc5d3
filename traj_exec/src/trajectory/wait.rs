//! Stationary trajectory segment

use crate::geometry::Pose2d;

/// Holds a pose for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct WaitSegment {
    pose: Pose2d,
    duration: f64,
}

impl WaitSegment {
    /// Negative durations are treated as zero.
    pub fn new(pose: Pose2d, duration: f64) -> Self {
        Self {
            pose,
            duration: duration.max(0.0),
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn get(&self, _t: f64) -> Pose2d {
        self.pose
    }

    pub fn velocity(&self, _t: f64) -> Pose2d {
        Pose2d::default()
    }

    pub fn acceleration(&self, _t: f64) -> Pose2d {
        Pose2d::default()
    }
}
