//! # Trajectory Executable Parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::trajectory::{DriveConstraints, DEFAULT_PROFILE_SAMPLE_SPACING};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajExecParams {
    /// Period at which the built trajectory is sampled for output, in seconds
    pub sample_period_s: f64,

    /// Displacement between constraint samples when profiling paths, in
    /// metres
    #[serde(default = "default_spacing")]
    pub profile_sample_spacing: f64,

    /// If true debug records are printed to the console and trace records
    /// are written to the session log
    #[serde(default)]
    pub verbose: bool,

    /// Limits used for every segment of the trajectory
    pub drive_constraints: DriveConstraints,
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn default_spacing() -> f64 {
    DEFAULT_PROFILE_SAMPLE_SPACING
}
