//! Main robot executable entry point.
//!
//! # Architecture
//!
//! The executable runs a simulated match against the robot's control code:
//!
//!     - Initialise all modules
//!     - Autonomous period:
//!         - Step the selected routine until it finishes or the period ends
//!     - Teleoperated period:
//!         - Build a drive command from the simulated driver's sticks
//!         - Pass it through the vision drive assistant
//!         - Optionally step the climber through its sequence
//!     - Every cycle:
//!         - Step the simulated drivetrain and intake
//!         - Archive the simulation and assistant reports
//!         - Publish the assistant's diagnostics
//!
//! # Modules
//!
//! Cyclic modules (e.g. `vision::VisionDriveAssistant`) provide a public
//! struct implementing the `util::module::State` trait.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use rob_lib::{
    auto::{modes, ActionCtx, AutoParams, RoutineKind},
    drive::{DriveCommand, Drivetrain, Kinematics, KinematicsParams},
    geom::Vector2d,
    params::RobExecParams,
    sim::{SimCamera, SimDrivetrain, SimIntake, SimReport},
    subsystems::{ClimberFsm, IntakeCtrl},
    vision::VisionDriveAssistant,
};
use util::{
    archive::{Archived, Archiver},
    diag::{DiagSource, DiagTable},
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Time between presses of the climb button by the simulated driver.
///
/// Units: seconds
const CLIMB_STEP_PERIOD_S: f64 = 2.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "rob_exec", about = "Simulated match runner for the robot software")]
struct Opts {
    /// Autonomous routine to run (one_ball, drive_off, none)
    #[structopt(short, long, default_value = "one_ball")]
    routine: RoutineKind,

    /// Length of the autonomous period, overrides the parameter file
    #[structopt(long)]
    auto_s: Option<f64>,

    /// Length of the teleoperated period, overrides the parameter file
    #[structopt(long)]
    teleop_s: Option<f64>,

    /// Enable the vision drive assistant during teleop
    #[structopt(short, long)]
    assist: bool,

    /// Step through the climb sequence during teleop
    #[structopt(short, long)]
    climb: bool,

    /// Run cycles back to back instead of in real time
    #[structopt(short, long)]
    fast: bool,

    /// Log at trace level
    #[structopt(short, long)]
    verbose: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("rob_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    let level = if opts.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    logger_init(level, &session).wrap_err("Failed to initialise logging")?;

    info!("Rapid React Robot Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opts);

    // ---- LOAD PARAMETERS ----

    let exec_params: RobExecParams =
        util::params::load("rob_exec.toml").wrap_err("Could not load exec params")?;
    let kin_params: KinematicsParams =
        util::params::load("drive.toml").wrap_err("Could not load drive params")?;
    let auto_params: AutoParams =
        util::params::load("auto.toml").wrap_err("Could not load auto params")?;

    info!("Exec parameters loaded");

    let auto_period_s = opts.auto_s.unwrap_or(exec_params.auto_period_s);
    let teleop_period_s = opts
        .teleop_s
        .unwrap_or(exec_params.teleop_period_s)
        .max(0.0);
    let cycle_period_s = exec_params.cycle_period_s;

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let kinematics = Kinematics::new(kin_params);

    let mut assist = VisionDriveAssistant::new(Default::default(), kinematics);
    assist
        .init("vision_assist.toml", &session)
        .wrap_err("Failed to initialise VisionDriveAssistant")?;
    info!("VisionDriveAssistant init complete");

    let routine = modes::build(opts.routine, &auto_params, kinematics)
        .wrap_err("Failed to build the autonomous routine")?;
    info!(
        "Routine {} built with {} actions",
        routine.kind(),
        routine.num_actions()
    );

    let mut drivetrain = SimDrivetrain::new(
        kinematics,
        exec_params.sim_full_throttle_speed_ins,
        routine.initial_pose(),
    );
    let mut intake = SimIntake::new();
    let camera = SimCamera::new(
        Vector2d::new(
            exec_params.sim_target_pos_in[0],
            exec_params.sim_target_pos_in[1],
        ),
        exec_params.sim_camera_fov_deg.to_radians(),
        exec_params.sim_camera_range_in,
    );

    let mut runner = routine.into_runner();
    let mut climber = ClimberFsm::new();

    let mut arch_sim =
        Archiver::from_path(&session, "sim/report.csv").wrap_err("Failed to open sim archive")?;
    let mut diag = DiagTable::new();

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Beginning main loop\n");

    let teleop_start_s = auto_period_s;
    let match_end_s = auto_period_s + teleop_period_s;
    let mut time_s = 0.0;
    let mut teleop_announced = false;
    let mut next_climb_step_s = teleop_start_s;

    while time_s < match_end_s {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        let pose = drivetrain.pose();

        if time_s < teleop_start_s || !runner.status().is_complete() {
            // ---- AUTONOMOUS ----

            let mut ctx = ActionCtx::new(time_s, pose, &mut drivetrain, &mut intake);
            runner.step_period(&mut ctx, teleop_start_s);
        } else {
            // ---- TELEOPERATED ----

            if !teleop_announced {
                info!("Teleop period started at {:.02} s", time_s);
                teleop_announced = true;
            }

            let stick_cmd =
                DriveCommand::from_arcade(exec_params.teleop_turn, exec_params.teleop_throttle);
            let goals = camera.observe(&pose);

            let cmd = assist.update(time_s, &pose, &goals, stick_cmd, opts.assist);
            drivetrain.set_drive_cmd(cmd);

            assist
                .write()
                .wrap_err("Failed to archive the assistant report")?;

            if opts.climb && time_s >= next_climb_step_s {
                climber.next_state();
                next_climb_step_s += CLIMB_STEP_PERIOD_S;
                info!("Climber now in {:?}", climber.state());
            }

            if let Some(demand) = climber.state().intake_demand() {
                if intake.state() != demand {
                    intake.set_state(demand);
                }
            }
        }

        // ---- SIMULATION ----

        drivetrain.step(cycle_period_s);
        intake.step(cycle_period_s);

        arch_sim
            .serialise(SimReport::new(time_s, &drivetrain, &intake))
            .wrap_err("Failed to archive the sim report")?;

        assist.log(&mut diag);

        time_s += cycle_period_s;

        // ---- CYCLE MANAGEMENT ----

        if opts.fast {
            continue;
        }

        // Get the end time of the cycle
        let cycle_dur = Instant::now() - cycle_start_instant;

        match Duration::from_secs_f64(cycle_period_s).checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - cycle_period_s
            ),
        }
    }

    // The loop can end without a teleop tick, make sure the routine is done
    {
        let pose = drivetrain.pose();
        let mut ctx = ActionCtx::new(time_s, pose, &mut drivetrain, &mut intake);
        runner.step_period(&mut ctx, teleop_start_s);
    }

    drivetrain.stop();

    let pose = drivetrain.pose();
    info!(
        "Match complete, final pose ({:.1}, {:.1}) in heading {:.3} rad",
        pose.position.x(),
        pose.position.y(),
        pose.heading_rad
    );

    info!(
        "Final diagnostics: {}",
        diag.to_json().wrap_err("Failed to serialise diagnostics")?
    );

    Ok(())
}
