//! # Trajectory Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use traj_lib::{
    geometry::{Pose2d, Vector2d},
    path::{Heading, Path, Waypoint},
    profile::{generate_motion_profile, MotionState, SimpleMotionConstraints},
    trajectory::{DriveConstraints, TrajectoryBuilder},
};

fn trajectory_benchmark(c: &mut Criterion) {
    // ---- Path construction ----

    let waypoints = vec![
        Waypoint::new(0.0, 0.0, 4.0, 0.0),
        Waypoint::new(4.0, 2.0, 4.0, 0.0),
        Waypoint::new(8.0, 0.0, 0.0, -4.0),
        Waypoint::new(6.0, -4.0, -4.0, 0.0),
    ];

    c.bench_function("Path::spline_through", |b| {
        b.iter(|| Path::spline_through(black_box(&waypoints), Heading::Tangent).unwrap())
    });

    // ---- Profile generation ----

    let start = MotionState::new(0.0, 0.0, 0.0);
    let goal = MotionState::new(20.0, 0.0, 0.0);
    let constraints = SimpleMotionConstraints::new(2.0, 1.0);

    c.bench_function("generate_motion_profile::80", |b| {
        b.iter(|| generate_motion_profile(&start, black_box(&goal), &constraints, 80).unwrap())
    });

    // ---- Per-cycle queries ----

    let trajectory = TrajectoryBuilder::new(
        Pose2d::new(0.0, 0.0, 0.0),
        DriveConstraints::new(1.0, 0.5, 1.0, 1.0),
    )
    .spline_to(Pose2d::new(4.0, 2.0, 0.0))
    .line_to(Vector2d::new(6.0, 2.0))
    .turn(std::f64::consts::FRAC_PI_2)
    .line_to(Vector2d::new(6.0, 6.0))
    .build()
    .unwrap();

    let t = trajectory.duration() * 0.7;

    c.bench_function("Trajectory::get", |b| {
        b.iter(|| trajectory.get(black_box(t)))
    });

    c.bench_function("Trajectory::sample", |b| {
        b.iter(|| trajectory.sample(black_box(t)))
    });
}

criterion_group!(benches, trajectory_benchmark);
criterion_main!(benches);
