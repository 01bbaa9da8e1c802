//! # Vision Assist and Action Benchmark

use criterion::{criterion_group, criterion_main, Criterion};

use rob_lib::{
    auto::{modes, ActionCtx, AutoParams, RoutineKind},
    drive::{DriveCommand, Kinematics},
    geom::{Pose, Vector2d},
    sim::{SimCamera, SimDrivetrain, SimIntake},
    vision::{GoalState, VisionDriveAssistant},
};

fn assist_benchmark(c: &mut Criterion) {
    let mut assist = VisionDriveAssistant::default();
    let pose = Pose::new(0.0, 0.0, 0.3);
    let target = Some(GoalState::new(Vector2d::new(120.0, 40.0), 0.9));
    let stick = DriveCommand::from_arcade(0.1, 0.6);

    let mut time_s = 0.0;
    c.bench_function("VisionDriveAssistant::assist", |b| {
        b.iter(|| {
            time_s += 0.02;
            assist.assist(time_s, &pose, target, stick, true)
        })
    });

    let camera = SimCamera::new(Vector2d::new(120.0, 40.0), 1.0, 300.0);
    c.bench_function("SimCamera::observe", |b| b.iter(|| camera.observe(&pose)));
}

fn routine_benchmark(c: &mut Criterion) {
    let kinematics = Kinematics::default();
    let params = AutoParams::default();

    // Whole one ball routine, built and stepped to completion each iteration
    c.bench_function("AutoRunner::one_ball", |b| {
        b.iter(|| {
            let routine = modes::build(RoutineKind::OneBall, &params, kinematics).unwrap();
            let mut drive = SimDrivetrain::new(kinematics, 100.0, routine.initial_pose());
            let mut intake = SimIntake::new();
            let mut runner = routine.into_runner();

            let mut time_s = 0.0;
            while !runner.status().is_complete() && time_s < 15.0 {
                let pose = drive.pose();
                let mut ctx = ActionCtx::new(time_s, pose, &mut drive, &mut intake);
                runner.step(&mut ctx, false);
                drive.step(0.02);
                intake.step(0.02);
                time_s += 0.02;
            }
        })
    });
}

criterion_group!(benches, assist_benchmark, routine_benchmark);
criterion_main!(benches);
