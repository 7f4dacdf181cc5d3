//! # Trajectory builder
//!
//! Accumulates motion steps starting from a known pose and turns them into a
//! [`Trajectory`] in one go. Each step starts where the previous one ended.
//!
//! Consecutive path steps driven in the same direction are joined into one
//! composite path with a single motion profile, so the robot does not stop
//! between them, as long as the joint is smooth: the direction of travel,
//! the heading and the rate of turn must all carry across it. Corners, turns,
//! waits and changes of driving direction end the current path and start a
//! new segment. A path that starts facing a different way from the robot is
//! preceded by a point turn, so the heading never jumps.
//!
//! [`TrajectoryBuilder::set_constraints`] swaps the drive limits used by the
//! following steps until [`TrajectoryBuilder::reset_constraints`]. Each motion
//! profile uses a single set of limits, so a change also ends the current path.
//!
//! When reversed, the robot drives backwards: each path is built from the
//! target back to the current pose and traversed from its end, so the robot
//! keeps facing away from the direction of travel.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use util::maths::EPSILON;

// Internal
use super::{
    DriveConstraints, PathTrajectorySegment, PointTurn, Trajectory, TrajectoryError,
    TrajectorySegment, WaitSegment,
};
use crate::{
    geometry::{self, Angle, Pose2d, Vector2d},
    path::{Heading, Path, PathError, PathSegment, Waypoint},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default displacement between constraint samples when profiling paths, in
/// metres.
pub const DEFAULT_PROFILE_SAMPLE_SPACING: f64 = 0.25;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TrajectoryBuilder {
    start: Pose2d,
    constraints: DriveConstraints,
    spacing: f64,
    steps: Vec<Step>,
}

/// Path segments waiting to be profiled together.
struct PendingPath {
    segments: Vec<PathSegment>,
    constraints: DriveConstraints,
    index: usize,
    kind: &'static str,
}

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Step {
    Path(PathStep),
    Turn(f64),
    TurnTo(f64),
    Wait(f64),
    SetReversed(bool),
    SetConstraints(DriveConstraints),
    ResetConstraints,
}

#[derive(Debug, Clone, Copy)]
enum PathStep {
    LineTo(Vector2d),
    StrafeTo(Vector2d),
    LineToLinearHeading(Pose2d),
    LineToSplineHeading(Pose2d),
    SplineTo(Pose2d),
    /// Offset in the robot's frame, driven with the heading held
    Relative(Vector2d, &'static str),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajectoryBuilder {
    pub fn new(start: Pose2d, constraints: DriveConstraints) -> Self {
        Self {
            start,
            constraints,
            spacing: DEFAULT_PROFILE_SAMPLE_SPACING,
            steps: Vec::new(),
        }
    }

    /// Set the displacement between constraint samples used when profiling
    /// paths.
    pub fn with_sample_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Drive in a straight line to `pos`, facing along the line.
    pub fn line_to(self, pos: Vector2d) -> Self {
        self.push(Step::Path(PathStep::LineTo(pos)))
    }

    /// Drive in a straight line to `pos` keeping the current heading.
    pub fn strafe_to(self, pos: Vector2d) -> Self {
        self.push(Step::Path(PathStep::StrafeTo(pos)))
    }

    /// Drive in a straight line to `pose`, turning at a constant rate.
    pub fn line_to_linear_heading(self, pose: Pose2d) -> Self {
        self.push(Step::Path(PathStep::LineToLinearHeading(pose)))
    }

    /// Drive in a straight line to `pose`, blending the heading smoothly.
    pub fn line_to_spline_heading(self, pose: Pose2d) -> Self {
        self.push(Step::Path(PathStep::LineToSplineHeading(pose)))
    }

    /// Drive along a spline to `pose`, facing along the spline.
    ///
    /// The spline leaves along the current heading and arrives along the
    /// heading of `pose`.
    pub fn spline_to(self, pose: Pose2d) -> Self {
        self.push(Step::Path(PathStep::SplineTo(pose)))
    }

    /// Drive `distance` metres straight ahead.
    pub fn forward(self, distance: f64) -> Self {
        self.relative(Vector2d::new(distance, 0.0), "forward")
    }

    /// Drive `distance` metres straight backwards, still facing forwards.
    pub fn back(self, distance: f64) -> Self {
        self.relative(Vector2d::new(-distance, 0.0), "back")
    }

    /// Strafe `distance` metres to the robot's left.
    pub fn strafe_left(self, distance: f64) -> Self {
        self.relative(Vector2d::new(0.0, distance), "strafe_left")
    }

    /// Strafe `distance` metres to the robot's right.
    pub fn strafe_right(self, distance: f64) -> Self {
        self.relative(Vector2d::new(0.0, -distance), "strafe_right")
    }

    /// Turn on the spot by `angle` radians, positive anticlockwise.
    pub fn turn(self, angle: f64) -> Self {
        self.push(Step::Turn(angle))
    }

    /// Turn on the spot to face `heading`, the short way round.
    pub fn turn_to(self, heading: f64) -> Self {
        self.push(Step::TurnTo(heading))
    }

    /// Stay still for `duration` seconds.
    pub fn wait(self, duration: f64) -> Self {
        self.push(Step::Wait(duration))
    }

    /// Drive the following paths backwards (`true`) or forwards (`false`).
    pub fn set_reversed(self, reversed: bool) -> Self {
        self.push(Step::SetReversed(reversed))
    }

    /// Use `constraints` instead of the builder's constraints for the
    /// following steps.
    pub fn set_constraints(self, constraints: DriveConstraints) -> Self {
        self.push(Step::SetConstraints(constraints))
    }

    /// Go back to the constraints the builder was created with.
    pub fn reset_constraints(self) -> Self {
        self.push(Step::ResetConstraints)
    }

    /// Build the trajectory.
    ///
    /// Failures are reported as [`TrajectoryError::Step`] naming the step
    /// that caused them. A builder with no moving steps gives
    /// [`TrajectoryError::Empty`].
    pub fn build(self) -> Result<Trajectory, TrajectoryError> {
        let mut segments: Vec<TrajectorySegment> = Vec::new();
        let mut pending: Option<PendingPath> = None;
        let mut pose = self.start;
        let mut reversed = false;
        let mut constraints = self.constraints;

        for (index, step) in self.steps.iter().enumerate() {
            match *step {
                Step::Path(path_step) => {
                    let segment = path_step
                        .build(&pose, reversed)
                        .map_err(|e| step_error(index, step, e))?;

                    let smooth = match pending.as_ref().and_then(|p| p.segments.last()) {
                        Some(prev) => joins_smoothly(prev, &segment),
                        None => true,
                    };
                    if !smooth {
                        self.flush(pending.take(), &mut segments)?;
                    }

                    // Face along the new path before driving it
                    let heading = segment.start().heading;
                    if Angle::norm(heading - pose.heading).abs() > EPSILON {
                        self.flush(pending.take(), &mut segments)?;

                        let turn = PointTurn::turn_to(pose, heading, &constraints)
                            .map_err(|e| step_error(index, step, e))?;
                        segments.push(turn.into());
                    }

                    pose = segment.end();

                    pending
                        .get_or_insert_with(|| PendingPath {
                            segments: Vec::new(),
                            constraints,
                            index,
                            kind: step.kind(),
                        })
                        .segments
                        .push(segment);
                }
                Step::Turn(angle) => {
                    self.flush(pending.take(), &mut segments)?;

                    let turn = PointTurn::new(pose, angle, &constraints)
                        .map_err(|e| step_error(index, step, e))?;

                    pose = turn.get(turn.duration());
                    segments.push(turn.into());
                }
                Step::TurnTo(heading) => {
                    self.flush(pending.take(), &mut segments)?;

                    let turn = PointTurn::turn_to(pose, heading, &constraints)
                        .map_err(|e| step_error(index, step, e))?;

                    pose = turn.get(turn.duration());
                    segments.push(turn.into());
                }
                Step::Wait(duration) => {
                    self.flush(pending.take(), &mut segments)?;
                    segments.push(WaitSegment::new(pose, duration).into());
                }
                Step::SetReversed(new_reversed) => {
                    if new_reversed != reversed {
                        self.flush(pending.take(), &mut segments)?;
                        reversed = new_reversed;
                    }
                }
                Step::SetConstraints(new_constraints) => {
                    if new_constraints != constraints {
                        self.flush(pending.take(), &mut segments)?;
                        constraints = new_constraints;
                    }
                }
                Step::ResetConstraints => {
                    if constraints != self.constraints {
                        self.flush(pending.take(), &mut segments)?;
                        constraints = self.constraints;
                    }
                }
            }
        }

        self.flush(pending.take(), &mut segments)?;

        let trajectory = Trajectory::new(segments)?;

        debug!(
            "Built trajectory with {} segments from {} steps, duration {:.3} s",
            trajectory.segments().len(),
            self.steps.len(),
            trajectory.duration()
        );

        Ok(trajectory)
    }

    fn relative(self, offset: Vector2d, kind: &'static str) -> Self {
        self.push(Step::Path(PathStep::Relative(offset, kind)))
    }

    fn push(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Profile any pending path segments and append them as one trajectory
    /// segment.
    fn flush(
        &self,
        pending: Option<PendingPath>,
        segments: &mut Vec<TrajectorySegment>,
    ) -> Result<(), TrajectoryError> {
        let PendingPath {
            segments: path_segments,
            constraints,
            index,
            kind,
        } = match pending {
            Some(p) => p,
            None => return Ok(()),
        };

        let wrap = |e: TrajectoryError| TrajectoryError::Step {
            index,
            kind,
            source: Box::new(e),
        };

        let path = Path::new(path_segments).map_err(|e| wrap(e.into()))?;
        let segment = PathTrajectorySegment::generate(path, &constraints, self.spacing)
            .map_err(|e| wrap(e.into()))?;

        segments.push(segment.into());

        Ok(())
    }
}

impl Step {
    fn kind(&self) -> &'static str {
        match self {
            Step::Path(PathStep::LineTo(_)) => "line_to",
            Step::Path(PathStep::StrafeTo(_)) => "strafe_to",
            Step::Path(PathStep::LineToLinearHeading(_)) => "line_to_linear_heading",
            Step::Path(PathStep::LineToSplineHeading(_)) => "line_to_spline_heading",
            Step::Path(PathStep::SplineTo(_)) => "spline_to",
            Step::Path(PathStep::Relative(_, kind)) => kind,
            Step::Turn(_) => "turn",
            Step::TurnTo(_) => "turn_to",
            Step::Wait(_) => "wait",
            Step::SetReversed(_) => "set_reversed",
            Step::SetConstraints(_) => "set_constraints",
            Step::ResetConstraints => "reset_constraints",
        }
    }
}

impl PathStep {
    /// The pose this step drives to from `current`.
    fn target(&self, current: &Pose2d) -> Pose2d {
        match *self {
            PathStep::LineTo(pos) | PathStep::StrafeTo(pos) => {
                Pose2d::from_vec(pos, current.heading)
            }
            PathStep::Relative(offset, _) => Pose2d::from_vec(
                current.vec() + geometry::rotate(&offset, current.heading),
                current.heading,
            ),
            PathStep::LineToLinearHeading(pose)
            | PathStep::LineToSplineHeading(pose)
            | PathStep::SplineTo(pose) => pose,
        }
    }

    /// Build the path segment from `current`.
    ///
    /// Reversed segments run along their curve from the target to the
    /// current pose, so the curve endpoints and heading boundaries are
    /// swapped here.
    fn build(&self, current: &Pose2d, reversed: bool) -> Result<PathSegment, PathError> {
        let target = self.target(current);
        let (from, to) = if reversed {
            (target, *current)
        } else {
            (*current, target)
        };

        let segment = match self {
            PathStep::LineTo(_) => PathSegment::line(from.vec(), to.vec(), Heading::Tangent)?,
            PathStep::StrafeTo(_) | PathStep::Relative(..) => PathSegment::line(
                from.vec(),
                to.vec(),
                Heading::Constant {
                    heading: current.heading,
                },
            )?,
            PathStep::LineToLinearHeading(_) => PathSegment::line(
                from.vec(),
                to.vec(),
                Heading::Linear {
                    start: from.heading,
                    end: to.heading,
                },
            )?,
            PathStep::LineToSplineHeading(_) => PathSegment::line(
                from.vec(),
                to.vec(),
                Heading::Spline {
                    start: from.heading,
                    end: to.heading,
                },
            )?,
            PathStep::SplineTo(_) => {
                let deriv_mag = (to.vec() - from.vec()).norm();

                PathSegment::spline(
                    &Waypoint::from_pose(&from, deriv_mag),
                    &Waypoint::from_pose(&to, deriv_mag),
                    Heading::Tangent,
                )?
            }
        };

        Ok(segment.with_reversed(reversed))
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// True if `next` carries on from `prev` with the same heading, direction of
/// travel and rate of turn, so the robot can drive across the joint without
/// stopping.
fn joins_smoothly(prev: &PathSegment, next: &PathSegment) -> bool {
    let end_deriv = prev.deriv(prev.length());
    let start_deriv = next.deriv(0.0);

    Angle::norm(prev.end().heading - next.start().heading).abs() < EPSILON
        && (end_deriv.vec() - start_deriv.vec()).norm() < EPSILON
        && (end_deriv.heading - start_deriv.heading).abs() < EPSILON
}

fn step_error<E>(index: usize, step: &Step, error: E) -> TrajectoryError
where
    E: Into<TrajectoryError>,
{
    TrajectoryError::Step {
        index,
        kind: step.kind(),
        source: Box::new(error.into()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn constraints() -> DriveConstraints {
        DriveConstraints::new(2.0, 1.0, 1.0, 1.0)
    }

    /// Checks that the pose never jumps between closely spaced samples. The
    /// heading bound is loose as the angular limit only holds exactly at the
    /// constraint samples.
    fn assert_continuous(trajectory: &Trajectory) {
        let dt = 1e-3;
        let c = constraints();
        let n = (trajectory.duration() / dt).ceil() as usize;

        let mut last = trajectory.get(0.0);
        for i in 1..=n {
            let pose = trajectory.get(i as f64 * dt);

            assert!((pose.vec() - last.vec()).norm() <= c.max_vel * dt + 1e-6);
            assert!(Angle::norm(pose.heading - last.heading).abs() <= 2.0 * c.max_ang_vel * dt);

            last = pose;
        }
    }

    #[test]
    fn test_line_turn_wait_line() -> Result<(), TrajectoryError> {
        let trajectory = TrajectoryBuilder::new(Pose2d::new(0.0, 0.0, 0.0), constraints())
            .line_to(Vector2d::new(5.0, 0.0))
            .turn(FRAC_PI_2)
            .wait(0.5)
            .line_to(Vector2d::new(5.0, 5.0))
            .build()?;

        let kinds: Vec<_> = trajectory.segments().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["path", "turn", "wait", "path"]);

        assert!(trajectory.start().approx_eq(&Pose2d::new(0.0, 0.0, 0.0), 1e-9));
        assert!(trajectory.end().approx_eq(&Pose2d::new(5.0, 5.0, FRAC_PI_2), 1e-6));

        assert_continuous(&trajectory);

        Ok(())
    }

    #[test]
    fn test_consecutive_paths_share_profile() -> Result<(), TrajectoryError> {
        let trajectory = TrajectoryBuilder::new(Pose2d::default(), constraints())
            .line_to(Vector2d::new(2.0, 0.0))
            .line_to(Vector2d::new(4.0, 0.0))
            .build()?;

        assert_eq!(trajectory.segments().len(), 1);

        match &trajectory.segments()[0] {
            TrajectorySegment::Path(segment) => {
                assert_eq!(segment.path().segments().len(), 2);
                assert!((segment.path().length() - 4.0).abs() < 1e-9);
            }
            other => panic!("Expected a path segment, found {}", other.kind()),
        }

        // Does not stop at the join, 4 m at 2 m/s and 1 m/s^2 takes 4 s
        assert!((trajectory.duration() - 4.0).abs() < 1e-6);
        assert!((trajectory.velocity(2.0).x - 2.0).abs() < 1e-6);

        Ok(())
    }

    #[test]
    fn test_corner_stops_and_turns() -> Result<(), TrajectoryError> {
        let trajectory = TrajectoryBuilder::new(Pose2d::default(), constraints())
            .line_to(Vector2d::new(2.0, 0.0))
            .line_to(Vector2d::new(2.0, 2.0))
            .build()?;

        let kinds: Vec<_> = trajectory.segments().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["path", "turn", "path"]);

        // Stopped at the corner
        let corner = trajectory.segments()[0].duration();
        assert!(trajectory.velocity(corner).vec().norm() < 1e-6);
        assert!((trajectory.get(corner).vec() - Vector2d::new(2.0, 0.0)).norm() < 1e-6);

        assert!(trajectory.end().approx_eq(&Pose2d::new(2.0, 2.0, FRAC_PI_2), 1e-6));
        assert_continuous(&trajectory);

        Ok(())
    }

    #[test]
    fn test_path_facing_away_turns_first() -> Result<(), TrajectoryError> {
        let trajectory = TrajectoryBuilder::new(Pose2d::default(), constraints())
            .line_to(Vector2d::new(-2.0, 0.0))
            .build()?;

        let kinds: Vec<_> = trajectory.segments().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["turn", "path"]);
        assert!(Angle::norm(trajectory.end().heading - PI).abs() < 1e-6);
        assert_continuous(&trajectory);

        Ok(())
    }

    #[test]
    fn test_relative_moves() -> Result<(), TrajectoryError> {
        let start = Pose2d::new(1.0, 1.0, FRAC_PI_2);
        let trajectory = TrajectoryBuilder::new(start, constraints())
            .forward(2.0)
            .strafe_right(1.0)
            .back(1.0)
            .strafe_left(1.0)
            .build()?;

        // Each move is at right angles to the last, all facing +y
        let kinds: Vec<_> = trajectory.segments().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["path", "path", "path", "path"]);

        let ends: Vec<_> = trajectory.segments().iter().map(|s| s.end()).collect();
        assert!(ends[0].approx_eq(&Pose2d::new(1.0, 3.0, FRAC_PI_2), 1e-6));
        assert!(ends[1].approx_eq(&Pose2d::new(2.0, 3.0, FRAC_PI_2), 1e-6));
        assert!(ends[2].approx_eq(&Pose2d::new(2.0, 2.0, FRAC_PI_2), 1e-6));
        assert!(ends[3].approx_eq(&Pose2d::new(1.0, 2.0, FRAC_PI_2), 1e-6));

        for i in 0..=100 {
            let t = trajectory.duration() * i as f64 / 100.0;
            assert!((trajectory.get(t).heading - FRAC_PI_2).abs() < 1e-9);
        }
        assert_continuous(&trajectory);

        Ok(())
    }

    #[test]
    fn test_constraints_override() -> Result<(), TrajectoryError> {
        let slow = DriveConstraints::new(1.0, 1.0, 1.0, 1.0);
        let trajectory = TrajectoryBuilder::new(Pose2d::default(), constraints())
            .line_to(Vector2d::new(4.0, 0.0))
            .set_constraints(slow)
            .line_to(Vector2d::new(8.0, 0.0))
            .reset_constraints()
            .line_to(Vector2d::new(12.0, 0.0))
            .build()?;

        // 4 s at the default limits, 5 s at the slow ones, then 4 s again
        assert_eq!(trajectory.segments().len(), 3);
        assert!((trajectory.segments()[1].duration() - 5.0).abs() < 1e-6);
        assert!((trajectory.duration() - 13.0).abs() < 1e-6);
        assert!((trajectory.velocity(6.5).x - 1.0).abs() < 1e-6);

        // Setting the limits already in use keeps the profile shared
        let trajectory = TrajectoryBuilder::new(Pose2d::default(), constraints())
            .line_to(Vector2d::new(2.0, 0.0))
            .set_constraints(constraints())
            .line_to(Vector2d::new(4.0, 0.0))
            .build()?;
        assert_eq!(trajectory.segments().len(), 1);

        Ok(())
    }

    #[test]
    fn test_reversed() -> Result<(), TrajectoryError> {
        let trajectory = TrajectoryBuilder::new(Pose2d::default(), constraints())
            .set_reversed(true)
            .line_to(Vector2d::new(-3.0, 0.0))
            .set_reversed(false)
            .line_to(Vector2d::new(0.0, 0.0))
            .build()?;

        // The direction change stops the robot between the two paths
        assert_eq!(trajectory.segments().len(), 2);

        let first = &trajectory.segments()[0];
        let mid = first.duration() / 2.0;
        assert!(trajectory.velocity(mid).x < 0.0);
        assert!(trajectory.get(mid).heading.abs() < 1e-9);
        assert!(first.end().approx_eq(&Pose2d::new(-3.0, 0.0, 0.0), 1e-9));

        assert!(trajectory.end().approx_eq(&Pose2d::new(0.0, 0.0, 0.0), 1e-9));
        assert_continuous(&trajectory);

        Ok(())
    }

    #[test]
    fn test_reversed_spline() -> Result<(), TrajectoryError> {
        let trajectory = TrajectoryBuilder::new(Pose2d::new(0.0, 0.0, PI), constraints())
            .set_reversed(true)
            .spline_to(Pose2d::new(4.0, 2.0, PI))
            .build()?;

        let start = trajectory.start();
        assert!(start.vec().norm() < 1e-6);
        assert!(Angle::norm(start.heading - PI).abs() < 1e-6);

        let end = trajectory.end();
        assert!((end.vec() - Vector2d::new(4.0, 2.0)).norm() < 1e-6);
        assert!(Angle::norm(end.heading - PI).abs() < 1e-6);

        // Facing -x while driving towards +x
        assert!(trajectory.velocity(trajectory.duration() / 2.0).x > 0.0);

        Ok(())
    }

    #[test]
    fn test_headings() -> Result<(), TrajectoryError> {
        let trajectory = TrajectoryBuilder::new(Pose2d::default(), constraints())
            .spline_to(Pose2d::new(5.0, 5.0, FRAC_PI_2))
            .line_to_linear_heading(Pose2d::new(5.0, 8.0, PI))
            .strafe_to(Vector2d::new(3.0, 8.0))
            .line_to_spline_heading(Pose2d::new(3.0, 10.0, FRAC_PI_2))
            .turn_to(0.0)
            .build()?;

        // Every joint changes the rate of turn or the direction of travel, so
        // each path is driven on its own
        let kinds: Vec<_> = trajectory.segments().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["path", "path", "path", "path", "turn"]);
        assert!(trajectory.end().approx_eq(&Pose2d::new(3.0, 10.0, 0.0), 1e-6));

        match &trajectory.segments()[2] {
            TrajectorySegment::Path(segment) => {
                // Strafing holds the heading reached by the linear turn
                assert!((segment.path().get(1.0).heading - PI).abs() < 1e-9);
            }
            other => panic!("Expected a path segment, found {}", other.kind()),
        }

        assert_continuous(&trajectory);

        Ok(())
    }

    #[test]
    fn test_errors() {
        let result = TrajectoryBuilder::new(Pose2d::default(), constraints())
            .line_to(Vector2d::new(1.0, 0.0))
            .line_to(Vector2d::new(1.0, 0.0))
            .build();

        match result {
            Err(TrajectoryError::Step {
                index: 1,
                kind: "line_to",
                source,
            }) => assert!(matches!(*source, TrajectoryError::Path(PathError::ZeroLength))),
            other => panic!("Unexpected result {:?}", other.map(|t| t.duration())),
        }

        assert!(matches!(
            TrajectoryBuilder::new(Pose2d::default(), constraints()).build(),
            Err(TrajectoryError::Empty)
        ));

        assert!(matches!(
            TrajectoryBuilder::new(Pose2d::default(), constraints())
                .with_sample_spacing(-1.0)
                .line_to(Vector2d::new(1.0, 0.0))
                .build(),
            Err(TrajectoryError::Step { index: 0, .. })
        ));
    }
}
