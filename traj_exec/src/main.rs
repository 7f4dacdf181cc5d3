//! Trajectory executable entry point.
//!
//! Builds the trajectory described by a plan file and writes it, sampled at a
//! fixed period, into a new session directory.
//!
//! # Usage
//!
//! ```text
//! traj_exec <plan.toml>
//! ```
//!
//! The `TRAJ_SW_ROOT` environment variable must point to the software root,
//! which holds `params/traj_exec.toml` and the `sessions` directory.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info};
use serde::Serialize;
use std::env;

// Internal
use traj_lib::{
    params::TrajExecParams,
    plan::TrajPlan,
    trajectory::{Trajectory, TrajectorySample},
};
use util::{
    logger::{logger_init, LevelFilter, LoggerConfig},
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Flat record written to the trajectory CSV.
#[derive(Serialize)]
struct SampleRecord {
    time_s: f64,
    x_m: f64,
    y_m: f64,
    heading_rad: f64,
    vel_x_ms: f64,
    vel_y_ms: f64,
    vel_heading_rads: f64,
    accel_x_mss: f64,
    accel_y_mss: f64,
    accel_heading_radss: f64,
}

/// Overview of the built trajectory.
#[derive(Serialize)]
struct Summary<'a> {
    plan_path: &'a str,
    duration_s: f64,
    num_segments: usize,
    segment_kinds: Vec<&'static str>,
    segment_durations_s: Vec<f64>,
    num_samples: usize,
    params: &'a TrajExecParams,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    let session = Session::new("traj_exec", "sessions").wrap_err("Failed to create the session")?;

    let params: TrajExecParams =
        util::params::load("traj_exec.toml").wrap_err("Could not load traj_exec params")?;

    // The session log always keeps debug records, verbose adds them to the
    // console and generator traces to the file
    let log_config = if params.verbose {
        LoggerConfig::new(LevelFilter::Debug, LevelFilter::Trace)
    } else {
        LoggerConfig::new(LevelFilter::Info, LevelFilter::Debug)
    };
    logger_init(&log_config, &session).wrap_err("Failed to initialise logging")?;

    info!("Trajectory Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("Parameters: {:#?}", params);

    // ---- LOAD PLAN ----

    let args: Vec<String> = env::args().collect();
    debug!("CLI arguments: {:?}", args);

    let plan_path = match args.get(1) {
        Some(p) => p,
        None => return Err(eyre!("Expected the path to a plan file as the first argument")),
    };

    info!("Loading plan from \"{}\"", plan_path);

    let plan: TrajPlan =
        util::params::load_file(plan_path).wrap_err("Failed to load the plan")?;

    info!("Plan contains {} steps", plan.steps.len());

    // ---- BUILD TRAJECTORY ----

    let trajectory = plan
        .build(&params.drive_constraints, params.profile_sample_spacing)
        .wrap_err("Failed to build the trajectory")?;

    info!(
        "Built trajectory lasting {:.03} s with {} segments",
        trajectory.duration(),
        trajectory.segments().len()
    );
    for (i, segment) in trajectory.segments().iter().enumerate() {
        info!(
            "    {:3}: {:4} {:8.03} s, ends at {:?}",
            i,
            segment.kind(),
            segment.duration(),
            segment.end()
        );
    }

    // ---- SAVE OUTPUT ----

    let samples = trajectory.sample_every(params.sample_period_s);
    let records: Vec<SampleRecord> = samples.iter().map(SampleRecord::from).collect();

    let csv_path = session
        .save_csv("trajectory.csv", &records)
        .wrap_err("Failed to save the sampled trajectory")?;

    let json_path = session
        .save_json("summary.json", &summarise(plan_path, &trajectory, samples.len(), &params))
        .wrap_err("Failed to save the summary")?;

    info!("Saved {} samples to {:?}", records.len(), csv_path);
    info!("Saved summary to {:?}", json_path);

    Ok(())
}

fn summarise<'a>(
    plan_path: &'a str,
    trajectory: &Trajectory,
    num_samples: usize,
    params: &'a TrajExecParams,
) -> Summary<'a> {
    Summary {
        plan_path,
        duration_s: trajectory.duration(),
        num_segments: trajectory.segments().len(),
        segment_kinds: trajectory.segments().iter().map(|s| s.kind()).collect(),
        segment_durations_s: trajectory.segments().iter().map(|s| s.duration()).collect(),
        num_samples,
        params,
    }
}

impl From<&TrajectorySample> for SampleRecord {
    fn from(sample: &TrajectorySample) -> Self {
        Self {
            time_s: sample.time_s,
            x_m: sample.pose.x,
            y_m: sample.pose.y,
            heading_rad: sample.pose.heading,
            vel_x_ms: sample.velocity.x,
            vel_y_ms: sample.velocity.y,
            vel_heading_rads: sample.velocity.heading,
            accel_x_mss: sample.acceleration.x,
            accel_y_mss: sample.acceleration.y,
            accel_heading_radss: sample.acceleration.heading,
        }
    }
}
