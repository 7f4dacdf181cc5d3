//! # Trajectory module
//!
//! Time indexed robot motion built from a sequence of segments:
//!
//! - [`PathTrajectorySegment`] drives along a [`Path`](crate::path::Path)
//!   following a generated motion profile.
//! - [`PointTurn`] rotates in place.
//! - [`WaitSegment`] holds a pose.
//!
//! A [`Trajectory`] dispatches queries to its segments by cumulative time.
//! Queries outside `[0, duration]` are clamped. Trajectories are usually
//! assembled with a [`TrajectoryBuilder`].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod builder;
mod constraints;
mod path_segment;
mod point_turn;
mod wait;

pub use builder::{TrajectoryBuilder, DEFAULT_PROFILE_SAMPLE_SPACING};
pub use constraints::{
    AngularVelocityConstraint, DriveConstraints, MinConstraints, ProfileAccelerationConstraint,
    TrajectoryConstraints, TranslationalVelocityConstraint,
};
pub use path_segment::PathTrajectorySegment;
pub use point_turn::PointTurn;
pub use wait::WaitSegment;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;
use thiserror::Error;

// Internal
use crate::{geometry::Pose2d, path::PathError, profile::ProfileError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A non-empty sequence of trajectory segments played back to back.
#[derive(Debug, Clone)]
pub struct Trajectory {
    segments: Vec<TrajectorySegment>,
    duration: f64,
}

/// The full kinematic state of a trajectory at one instant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub pose: Pose2d,
    pub velocity: Pose2d,
    pub acceleration: Pose2d,
}

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum TrajectorySegment {
    Path(PathTrajectorySegment),
    Turn(PointTurn),
    Wait(WaitSegment),
}

/// Errors raised while building trajectories.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("A trajectory must contain at least one segment")]
    Empty,

    #[error("Path error: {0}")]
    Path(#[from] PathError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Builder step {index} ({kind}) failed: {source}")]
    Step {
        index: usize,
        kind: &'static str,
        #[source]
        source: Box<TrajectoryError>,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Trajectory {
    pub fn new(segments: Vec<TrajectorySegment>) -> Result<Self, TrajectoryError> {
        if segments.is_empty() {
            return Err(TrajectoryError::Empty);
        }

        let duration = segments.iter().map(|s| s.duration()).sum();

        Ok(Self { segments, duration })
    }

    pub fn segments(&self) -> &[TrajectorySegment] {
        &self.segments
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn get(&self, t: f64) -> Pose2d {
        let (segment, t) = self.dispatch(t);
        segment.get(t)
    }

    pub fn velocity(&self, t: f64) -> Pose2d {
        let (segment, t) = self.dispatch(t);
        segment.velocity(t)
    }

    pub fn acceleration(&self, t: f64) -> Pose2d {
        let (segment, t) = self.dispatch(t);
        segment.acceleration(t)
    }

    pub fn start(&self) -> Pose2d {
        self.get(0.0)
    }

    pub fn end(&self) -> Pose2d {
        self.get(self.duration)
    }

    /// Pose, velocity and acceleration at time `t`.
    pub fn sample(&self, t: f64) -> TrajectorySample {
        let (segment, local_t) = self.dispatch(t);

        TrajectorySample {
            time_s: t,
            pose: segment.get(local_t),
            velocity: segment.velocity(local_t),
            acceleration: segment.acceleration(local_t),
        }
    }

    /// Sample the whole trajectory every `period_s` seconds, always including
    /// the final instant.
    ///
    /// A non-positive period gives just the start and end samples.
    pub fn sample_every(&self, period_s: f64) -> Vec<TrajectorySample> {
        let mut samples = Vec::new();

        if period_s > 0.0 {
            let num_steps = (self.duration / period_s).floor() as usize;
            samples.extend((0..=num_steps).map(|i| self.sample(i as f64 * period_s)));
        } else {
            samples.push(self.sample(0.0));
        }

        let last_time = samples.last().map(|s| s.time_s).unwrap_or(0.0);
        if last_time < self.duration {
            samples.push(self.sample(self.duration));
        }

        samples
    }

    /// Find the segment active at time `t` and the time within it.
    fn dispatch(&self, t: f64) -> (&TrajectorySegment, f64) {
        let mut remaining = t.max(0.0).min(self.duration);

        for segment in &self.segments {
            if remaining <= segment.duration() {
                return (segment, remaining);
            }
            remaining -= segment.duration();
        }

        let last = &self.segments[self.segments.len() - 1];
        (last, last.duration())
    }
}

impl TrajectorySegment {
    pub fn duration(&self) -> f64 {
        match self {
            TrajectorySegment::Path(s) => s.duration(),
            TrajectorySegment::Turn(s) => s.duration(),
            TrajectorySegment::Wait(s) => s.duration(),
        }
    }

    pub fn get(&self, t: f64) -> Pose2d {
        match self {
            TrajectorySegment::Path(s) => s.get(t),
            TrajectorySegment::Turn(s) => s.get(t),
            TrajectorySegment::Wait(s) => s.get(t),
        }
    }

    pub fn velocity(&self, t: f64) -> Pose2d {
        match self {
            TrajectorySegment::Path(s) => s.velocity(t),
            TrajectorySegment::Turn(s) => s.velocity(t),
            TrajectorySegment::Wait(s) => s.velocity(t),
        }
    }

    pub fn acceleration(&self, t: f64) -> Pose2d {
        match self {
            TrajectorySegment::Path(s) => s.acceleration(t),
            TrajectorySegment::Turn(s) => s.acceleration(t),
            TrajectorySegment::Wait(s) => s.acceleration(t),
        }
    }

    pub fn start(&self) -> Pose2d {
        self.get(0.0)
    }

    pub fn end(&self) -> Pose2d {
        self.get(self.duration())
    }

    /// Short name of the segment kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TrajectorySegment::Path(_) => "path",
            TrajectorySegment::Turn(_) => "turn",
            TrajectorySegment::Wait(_) => "wait",
        }
    }
}

impl From<PathTrajectorySegment> for TrajectorySegment {
    fn from(segment: PathTrajectorySegment) -> Self {
        TrajectorySegment::Path(segment)
    }
}

impl From<PointTurn> for TrajectorySegment {
    fn from(segment: PointTurn) -> Self {
        TrajectorySegment::Turn(segment)
    }
}

impl From<WaitSegment> for TrajectorySegment {
    fn from(segment: WaitSegment) -> Self {
        TrajectorySegment::Wait(segment)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_dispatch() -> Result<(), TrajectoryError> {
        let constraints = DriveConstraints::new(1.0, 1.0, 1.0, 1.0);
        let pose = Pose2d::new(1.0, 1.0, 0.0);

        let trajectory = Trajectory::new(vec![
            WaitSegment::new(pose, 1.0).into(),
            PointTurn::new(pose, PI, &constraints)?.into(),
            WaitSegment::new(Pose2d::new(1.0, 1.0, PI), 2.0).into(),
        ])?;

        // pi rad at 1 rad/s and 1 rad/s^2 takes 1 + (pi - 1) + 1 s
        assert!((trajectory.duration() - (4.0 + PI)).abs() < 1e-6);

        assert!(trajectory.get(0.5).approx_eq(&pose, 1e-12));
        assert!((trajectory.velocity(1.0 + PI / 2.0 + 0.5).heading - 1.0).abs() < 1e-6);

        // Clamped at both ends
        assert!(trajectory.get(-1.0).approx_eq(&pose, 1e-12));
        assert!((trajectory.get(100.0).heading - PI).abs() < 1e-9);
        assert_eq!(trajectory.velocity(100.0), Pose2d::default());

        Ok(())
    }

    #[test]
    fn test_sample_every() -> Result<(), TrajectoryError> {
        let trajectory = Trajectory::new(vec![WaitSegment::new(Pose2d::default(), 1.05).into()])?;
        let samples = trajectory.sample_every(0.1);

        assert_eq!(samples.len(), 12);
        assert_eq!(samples[0].time_s, 0.0);
        assert!((samples[11].time_s - 1.05).abs() < 1e-12);

        Ok(())
    }

    #[test]
    fn test_empty() {
        assert!(matches!(Trajectory::new(Vec::new()), Err(TrajectoryError::Empty)));
    }
}
