//! # Trajectory plans
//!
//! A plan is a serialisable description of a trajectory: a start pose and a
//! list of steps mirroring the [`TrajectoryBuilder`] methods. Plans are
//! usually loaded from TOML files such as:
//!
//! ```toml
//! start = { x = 0.0, y = 0.0, heading = 0.0 }
//!
//! [[steps]]
//! type = "line_to"
//! x = 2.0
//! y = 0.0
//!
//! [[steps]]
//! type = "turn"
//! angle = 1.5708
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use crate::{
    geometry::{Pose2d, Vector2d},
    trajectory::{DriveConstraints, Trajectory, TrajectoryBuilder, TrajectoryError},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajPlan {
    /// Pose the trajectory starts from
    pub start: Pose2d,

    /// Steps in the order they are driven
    #[serde(default)]
    pub steps: Vec<PlanStep>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A single plan step. Positions are in metres, angles in radians and
/// durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanStep {
    LineTo { x: f64, y: f64 },
    StrafeTo { x: f64, y: f64 },
    LineToLinearHeading { x: f64, y: f64, heading: f64 },
    LineToSplineHeading { x: f64, y: f64, heading: f64 },
    SplineTo { x: f64, y: f64, heading: f64 },
    Forward { distance: f64 },
    Back { distance: f64 },
    StrafeLeft { distance: f64 },
    StrafeRight { distance: f64 },
    Turn { angle: f64 },
    TurnTo { heading: f64 },
    Wait { duration: f64 },
    SetReversed { reversed: bool },
    SetConstraints {
        max_vel: f64,
        max_accel: f64,
        max_ang_vel: f64,
        max_ang_accel: f64,
    },
    ResetConstraints,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajPlan {
    /// Build the trajectory described by this plan.
    ///
    /// `spacing` is the displacement between constraint samples used to
    /// profile paths.
    pub fn build(
        &self,
        constraints: &DriveConstraints,
        spacing: f64,
    ) -> Result<Trajectory, TrajectoryError> {
        self.steps
            .iter()
            .fold(
                TrajectoryBuilder::new(self.start, *constraints).with_sample_spacing(spacing),
                |builder, step| step.apply(builder),
            )
            .build()
    }
}

impl PlanStep {
    fn apply(&self, builder: TrajectoryBuilder) -> TrajectoryBuilder {
        match *self {
            PlanStep::LineTo { x, y } => builder.line_to(Vector2d::new(x, y)),
            PlanStep::StrafeTo { x, y } => builder.strafe_to(Vector2d::new(x, y)),
            PlanStep::LineToLinearHeading { x, y, heading } => {
                builder.line_to_linear_heading(Pose2d::new(x, y, heading))
            }
            PlanStep::LineToSplineHeading { x, y, heading } => {
                builder.line_to_spline_heading(Pose2d::new(x, y, heading))
            }
            PlanStep::SplineTo { x, y, heading } => builder.spline_to(Pose2d::new(x, y, heading)),
            PlanStep::Forward { distance } => builder.forward(distance),
            PlanStep::Back { distance } => builder.back(distance),
            PlanStep::StrafeLeft { distance } => builder.strafe_left(distance),
            PlanStep::StrafeRight { distance } => builder.strafe_right(distance),
            PlanStep::Turn { angle } => builder.turn(angle),
            PlanStep::TurnTo { heading } => builder.turn_to(heading),
            PlanStep::Wait { duration } => builder.wait(duration),
            PlanStep::SetReversed { reversed } => builder.set_reversed(reversed),
            PlanStep::SetConstraints {
                max_vel,
                max_accel,
                max_ang_vel,
                max_ang_accel,
            } => builder.set_constraints(DriveConstraints::new(
                max_vel,
                max_accel,
                max_ang_vel,
                max_ang_accel,
            )),
            PlanStep::ResetConstraints => builder.reset_constraints(),
        }
    }
}
