//! Trajectory segment following a path

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;

// Internal
use super::TrajectoryConstraints;
use crate::{
    geometry::Pose2d,
    path::Path,
    profile::{
        generate_motion_profile, FnMotionConstraints, MotionProfile, MotionState, ProfileError,
    },
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A path paired with a displacement profile from rest at its start to rest
/// at its end.
#[derive(Debug, Clone)]
pub struct PathTrajectorySegment {
    path: Path,
    profile: MotionProfile,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PathTrajectorySegment {
    /// Pair a path with an existing profile over its displacement.
    pub fn new(path: Path, profile: MotionProfile) -> Self {
        Self { path, profile }
    }

    /// Generate the profile for the path, sampling the constraints every
    /// `spacing` metres (rounded so the samples divide the path evenly).
    pub fn generate<C>(path: Path, constraints: &C, spacing: f64) -> Result<Self, ProfileError>
    where
        C: TrajectoryConstraints + ?Sized,
    {
        if !(spacing > 0.0) || !spacing.is_finite() {
            return Err(ProfileError::InvalidResolution);
        }

        let length = path.length();
        let resolution = ((length / spacing).ceil() as usize).max(1);

        let profile = {
            let path_constraints = FnMotionConstraints(|s: f64| {
                constraints.get(&path.get(s), &path.deriv(s), &path.second_deriv(s))
            });

            generate_motion_profile(
                &MotionState::new(0.0, 0.0, 0.0),
                &MotionState::new(length, 0.0, 0.0),
                &path_constraints,
                resolution,
            )?
        };

        debug!(
            "Generated path segment of length {:.3} m, duration {:.3} s",
            length,
            profile.duration()
        );

        Ok(Self { path, profile })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    pub fn duration(&self) -> f64 {
        self.profile.duration()
    }

    pub fn get(&self, t: f64) -> Pose2d {
        self.path.get(self.profile.get(t).x)
    }

    pub fn velocity(&self, t: f64) -> Pose2d {
        let state = self.profile.get(t);

        self.path.deriv(state.x) * state.v
    }

    pub fn acceleration(&self, t: f64) -> Pose2d {
        let state = self.profile.get(t);

        self.path.second_deriv(state.x) * (state.v * state.v) + self.path.deriv(state.x) * state.a
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        geometry::Vector2d,
        path::{Heading, PathSegment},
        trajectory::DriveConstraints,
    };

    fn straight(length: f64) -> Path {
        Path::new(vec![PathSegment::line(
            Vector2d::new(0.0, 0.0),
            Vector2d::new(length, 0.0),
            Heading::Tangent,
        )
        .unwrap()])
        .unwrap()
    }

    #[test]
    fn test_straight_line() -> Result<(), ProfileError> {
        let constraints = DriveConstraints::new(5.0, 5.0, 1.0, 1.0);
        let segment = PathTrajectorySegment::generate(straight(10.0), &constraints, 0.25)?;

        assert!((segment.duration() - 3.0).abs() < 1e-6);
        assert!(segment.get(0.0).approx_eq(&Pose2d::new(0.0, 0.0, 0.0), 1e-9));
        assert!(segment.get(3.0).approx_eq(&Pose2d::new(10.0, 0.0, 0.0), 1e-9));

        let vel = segment.velocity(1.5);
        assert!((vel.x - 5.0).abs() < 1e-6);
        assert!(vel.y.abs() < 1e-9);

        let accel = segment.acceleration(0.5);
        assert!((accel.x - 5.0).abs() < 1e-6);

        Ok(())
    }

    #[test]
    fn test_reversed_line() -> Result<(), ProfileError> {
        let path = Path::new(vec![PathSegment::line(
            Vector2d::new(0.0, 0.0),
            Vector2d::new(10.0, 0.0),
            Heading::Tangent,
        )
        .unwrap()
        .with_reversed(true)])
        .unwrap();

        let constraints = DriveConstraints::new(5.0, 5.0, 1.0, 1.0);
        let segment = PathTrajectorySegment::generate(path, &constraints, 0.25)?;

        // Driving backwards along x while facing +x
        assert!(segment.get(0.0).approx_eq(&Pose2d::new(10.0, 0.0, 0.0), 1e-9));
        assert!((segment.velocity(1.5).x + 5.0).abs() < 1e-6);
        assert!(segment.get(3.0).approx_eq(&Pose2d::new(0.0, 0.0, 0.0), 1e-9));

        Ok(())
    }

    #[test]
    fn test_bad_spacing() {
        let constraints = DriveConstraints::new(5.0, 5.0, 1.0, 1.0);

        assert!(matches!(
            PathTrajectorySegment::generate(straight(1.0), &constraints, 0.0),
            Err(ProfileError::InvalidResolution)
        ));
    }
}
