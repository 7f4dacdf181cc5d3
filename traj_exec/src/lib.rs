//! # Trajectory library
//!
//! Spline paths, motion profiles and time parameterised trajectories for a
//! planar mobile robot. Everything here is built once before motion starts
//! and then queried once per control cycle, queries never fail and clamp
//! their argument into range.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Geometry - poses, vectors and angle helpers
pub mod geometry;

/// Path - quintic spline and line curves reparameterised by arc length
pub mod path;

/// Profile - one dimensional motion profiles and their generators
pub mod profile;

/// Trajectory - paths, turns and waits combined with motion profiles
pub mod trajectory;

/// Plan - serialisable trajectory descriptions
pub mod plan;

/// Parameters for the trajectory executable
pub mod params;
