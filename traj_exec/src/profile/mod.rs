//! # Profile module
//!
//! One dimensional motion profiles and their generation.
//!
//! A [`MotionProfile`] is an ordered list of constant jerk
//! [`MotionSegment`]s queried by time. Profiles are generated from a start
//! and goal [`MotionState`]:
//!
//! - [`generate_motion_profile`] obeys displacement dependent velocity and
//!   acceleration limits given by a [`MotionConstraints`] implementation.
//! - [`generate_simple_motion_profile`] is the constant limit special case.
//! - [`generate_jerk_limited_profile`] additionally limits jerk, giving an
//!   S-curve.
//! - [`OnlineMotionProfile`] computes velocity commands one cycle at a time
//!   from measured displacement.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod builder;
mod constraints;
mod displacement;
mod generator;
mod jerk;
mod motion_profile;
mod online;
mod segment;
mod state;

pub use builder::MotionProfileBuilder;
pub use constraints::{FnMotionConstraints, MotionConstraints, SimpleMotionConstraints};
pub use displacement::{DisplacementProfile, DisplacementSegment, DisplacementState};
pub use generator::{
    convert_profile, generate_backward_pass, generate_displacement_profile,
    generate_motion_profile, generate_simple_motion_profile,
};
pub use jerk::generate_jerk_limited_profile;
pub use motion_profile::MotionProfile;
pub use online::{generate_online_motion_profile, Clock, OnlineMotionProfile, SystemClock};
pub use segment::MotionSegment;
pub use state::MotionState;

pub(crate) use util::maths::EPSILON;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// Errors raised while generating profiles.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile resolution must be at least 1")]
    InvalidResolution,

    #[error(
        "Invalid constraints at x = {x}: max velocity {max_vel}, max acceleration {max_accel}"
    )]
    InvalidConstraints { x: f64, max_vel: f64, max_accel: f64 },

    #[error("Profile cannot progress from x = {x} with v = {v}, a = {a}")]
    Infeasible { x: f64, v: f64, a: f64 },
}
