//! Pose dependent trajectory constraints
//!
//! Single limits ([`TranslationalVelocityConstraint`],
//! [`AngularVelocityConstraint`], [`ProfileAccelerationConstraint`]) can be
//! combined with [`MinConstraints`], which follows the tightest of its members.
//! A single limit reports infinity for the quantity it does not constrain, so
//! a combination needs at least one velocity and one acceleration limit.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use crate::{geometry::Pose2d, profile::SimpleMotionConstraints};
use util::maths::EPSILON;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Limits on the path speed given the pose and its displacement derivatives
/// at a point on a path.
pub trait TrajectoryConstraints {
    fn get(&self, pose: &Pose2d, deriv: &Pose2d, second_deriv: &Pose2d) -> SimpleMotionConstraints;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive limits shared by every kind of trajectory segment.
///
/// Paths are limited by the linear limits and by `max_ang_vel`, point turns
/// by the two angular limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveConstraints {
    /// Maximum linear velocity in m/s
    pub max_vel: f64,

    /// Maximum linear acceleration in m/s^2
    pub max_accel: f64,

    /// Maximum angular velocity in rad/s
    pub max_ang_vel: f64,

    /// Maximum angular acceleration in rad/s^2, only used by point turns
    pub max_ang_accel: f64,
}

/// Caps the path speed at a fixed linear velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TranslationalVelocityConstraint {
    /// Maximum linear velocity in m/s
    pub max_vel: f64,
}

/// Caps the path speed so that the heading never turns faster than
/// `max_ang_vel`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularVelocityConstraint {
    /// Maximum angular velocity in rad/s
    pub max_ang_vel: f64,
}

/// Fixed acceleration limit along the path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileAccelerationConstraint {
    /// Maximum acceleration along the path in m/s^2
    pub max_accel: f64,
}

/// The tightest velocity and acceleration limits of a set of constraints.
#[derive(Default)]
pub struct MinConstraints {
    constraints: Vec<Box<dyn TrajectoryConstraints>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveConstraints {
    pub fn new(max_vel: f64, max_accel: f64, max_ang_vel: f64, max_ang_accel: f64) -> Self {
        Self {
            max_vel,
            max_accel,
            max_ang_vel,
            max_ang_accel,
        }
    }

    /// Constraints for a point turn, as a motion along the heading.
    pub fn angular(&self) -> SimpleMotionConstraints {
        SimpleMotionConstraints::new(self.max_ang_vel, self.max_ang_accel)
    }
}

impl TrajectoryConstraints for DriveConstraints {
    fn get(&self, pose: &Pose2d, deriv: &Pose2d, second_deriv: &Pose2d) -> SimpleMotionConstraints {
        let limits = [
            TranslationalVelocityConstraint::new(self.max_vel).get(pose, deriv, second_deriv),
            AngularVelocityConstraint::new(self.max_ang_vel).get(pose, deriv, second_deriv),
            ProfileAccelerationConstraint::new(self.max_accel).get(pose, deriv, second_deriv),
        ];

        tightest(limits.iter().copied())
    }
}

impl TranslationalVelocityConstraint {
    pub fn new(max_vel: f64) -> Self {
        Self { max_vel }
    }
}

impl TrajectoryConstraints for TranslationalVelocityConstraint {
    fn get(&self, _pose: &Pose2d, _deriv: &Pose2d, _second_deriv: &Pose2d) -> SimpleMotionConstraints {
        SimpleMotionConstraints::new(self.max_vel, f64::INFINITY)
    }
}

impl AngularVelocityConstraint {
    pub fn new(max_ang_vel: f64) -> Self {
        Self { max_ang_vel }
    }
}

impl TrajectoryConstraints for AngularVelocityConstraint {
    fn get(&self, _pose: &Pose2d, deriv: &Pose2d, _second_deriv: &Pose2d) -> SimpleMotionConstraints {
        // The heading rate along the path scales with the path speed
        let max_vel = if deriv.heading.abs() > EPSILON {
            self.max_ang_vel / deriv.heading.abs()
        } else {
            f64::INFINITY
        };

        SimpleMotionConstraints::new(max_vel, f64::INFINITY)
    }
}

impl ProfileAccelerationConstraint {
    pub fn new(max_accel: f64) -> Self {
        Self { max_accel }
    }
}

impl TrajectoryConstraints for ProfileAccelerationConstraint {
    fn get(&self, _pose: &Pose2d, _deriv: &Pose2d, _second_deriv: &Pose2d) -> SimpleMotionConstraints {
        SimpleMotionConstraints::new(f64::INFINITY, self.max_accel)
    }
}

impl MinConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint to the set.
    pub fn with<C>(mut self, constraint: C) -> Self
    where
        C: TrajectoryConstraints + 'static,
    {
        self.constraints.push(Box::new(constraint));
        self
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl TrajectoryConstraints for MinConstraints {
    fn get(&self, pose: &Pose2d, deriv: &Pose2d, second_deriv: &Pose2d) -> SimpleMotionConstraints {
        tightest(
            self.constraints
                .iter()
                .map(|c| c.get(pose, deriv, second_deriv)),
        )
    }
}

impl TrajectoryConstraints for SimpleMotionConstraints {
    fn get(&self, _pose: &Pose2d, _deriv: &Pose2d, _second_deriv: &Pose2d) -> SimpleMotionConstraints {
        *self
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Smallest velocity and acceleration limit over `limits`, infinite if there
/// are none.
fn tightest<I>(limits: I) -> SimpleMotionConstraints
where
    I: Iterator<Item = SimpleMotionConstraints>,
{
    limits.fold(
        SimpleMotionConstraints::new(f64::INFINITY, f64::INFINITY),
        |acc, c| {
            SimpleMotionConstraints::new(acc.max_vel.min(c.max_vel), acc.max_accel.min(c.max_accel))
        },
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_drive_constraints() {
        let constraints = DriveConstraints::new(5.0, 2.0, 1.0, 3.0);
        let pose = Pose2d::default();

        // Straight motion is only limited by the linear limits
        let c = constraints.get(&pose, &Pose2d::new(1.0, 0.0, 0.0), &Pose2d::default());
        assert_eq!(c, SimpleMotionConstraints::new(5.0, 2.0));

        // Turning at 0.5 rad/m limits the speed to 2 m/s
        let c = constraints.get(&pose, &Pose2d::new(1.0, 0.0, -0.5), &Pose2d::default());
        assert!((c.max_vel - 2.0).abs() < 1e-12);
        assert_eq!(c.max_accel, 2.0);

        assert_eq!(constraints.angular(), SimpleMotionConstraints::new(1.0, 3.0));
    }

    #[test]
    fn test_min_constraints() {
        let pose = Pose2d::default();
        let turning = Pose2d::new(1.0, 0.0, 0.25);

        let combined = MinConstraints::new()
            .with(TranslationalVelocityConstraint::new(3.0))
            .with(AngularVelocityConstraint::new(0.5))
            .with(ProfileAccelerationConstraint::new(1.5));
        assert_eq!(combined.len(), 3);

        // 0.5 rad/s at 0.25 rad/m allows 2 m/s
        let c = combined.get(&pose, &turning, &Pose2d::default());
        assert!((c.max_vel - 2.0).abs() < 1e-12);
        assert_eq!(c.max_accel, 1.5);

        // The same limits as drive constraints
        let drive = DriveConstraints::new(3.0, 1.5, 0.5, 1.0);
        assert_eq!(drive.get(&pose, &turning, &Pose2d::default()), c);

        // Unconstrained quantities are infinite
        let c = AngularVelocityConstraint::new(0.5).get(
            &pose,
            &Pose2d::new(1.0, 0.0, 0.0),
            &Pose2d::default(),
        );
        assert_eq!(c.max_vel, f64::INFINITY);
        assert_eq!(c.max_accel, f64::INFINITY);
        assert!(MinConstraints::new().is_empty());
    }

    #[test]
    fn test_path_with_min_constraints() -> Result<(), crate::trajectory::TrajectoryError> {
        use crate::{
            geometry::Vector2d,
            path::{Heading, Path, PathSegment},
            trajectory::PathTrajectorySegment,
        };

        let path = Path::new(vec![PathSegment::line(
            Vector2d::new(0.0, 0.0),
            Vector2d::new(10.0, 0.0),
            Heading::Tangent,
        )?])?;
        let constraints = MinConstraints::new()
            .with(TranslationalVelocityConstraint::new(5.0))
            .with(ProfileAccelerationConstraint::new(5.0));

        let segment = PathTrajectorySegment::generate(path, &constraints, 0.25)?;

        assert!((segment.duration() - 3.0).abs() < 1e-6);

        Ok(())
    }
}
