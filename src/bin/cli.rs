//! momentum-fps CLI - run scripted movement scenarios headless

use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;

use momentum_fps::config::{ControllerConfig, SimConfig};
use momentum_fps::game::constants::physics as consts;
use momentum_fps::game::{InputFrame, InputScript, Simulation};

#[derive(Parser)]
#[command(name = "momentum-fps")]
#[command(about = "First-person momentum movement controller", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an input script through the controller on a flat floor
    Simulate {
        /// Controller tuning (TOML). Defaults are used when omitted.
        #[arg(short, long, env = "MOMENTUM_FPS_CONFIG")]
        config: Option<PathBuf>,
        /// Input script (TOML). Without one the player stands still.
        #[arg(short, long)]
        script: Option<PathBuf>,
        /// Frames to run when no script is given
        #[arg(long, default_value = "144")]
        frames: u32,
        /// Input/render frames per second
        #[arg(long, default_value_t = consts::DEFAULT_FRAME_RATE)]
        fps: f32,
        /// Fixed physics step in seconds
        #[arg(long, default_value_t = consts::TIMESTEP)]
        fixed_step: f32,
        /// Log the speed readout every N frames (0 = only events)
        #[arg(long, default_value = "12")]
        report_every: u32,
    },
    /// Print the default controller tuning as TOML
    Defaults,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            script,
            frames,
            fps,
            fixed_step,
            report_every,
        } => simulate(config, script, frames, fps, fixed_step, report_every),
        Commands::Defaults => print_defaults(),
    }
}

fn simulate(
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    frames: u32,
    fps: f32,
    fixed_step: f32,
    report_every: u32,
) {
    let controller_config = match config {
        Some(path) => match ControllerConfig::from_file(&path) {
            Ok(c) => c,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => ControllerConfig::default(),
    };

    let script = match script {
        Some(path) => match InputScript::from_file(&path) {
            Ok(s) => Some(s),
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let sim_config = SimConfig {
        fixed_timestep: fixed_step,
        frame_rate: fps,
        ..Default::default()
    };
    let mut sim = match Simulation::flat_ground(controller_config, sim_config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let frame_dt = sim.config().frame_dt();
    let inputs: Box<dyn Iterator<Item = InputFrame> + '_> = match &script {
        Some(script) => {
            info!(
                "running {} segments ({:.2}s) at {:.0} fps",
                script.segments.len(),
                script.total_duration(),
                fps
            );
            Box::new(script.play(frame_dt))
        }
        None => Box::new(std::iter::repeat(InputFrame::default()).take(frames as usize)),
    };

    let mut top_speed = 0.0f32;
    for input in inputs {
        let report = sim.frame(&input, frame_dt);
        top_speed = top_speed.max(report.speed_kmh);

        for event in &report.events {
            info!("[frame {:>5}] {:?}", sim.frames(), event);
        }
        if report_every > 0 && sim.frames() % report_every as u64 == 0 {
            let pos = sim.player_position().unwrap_or_default();
            info!(
                "[frame {:>5}] {} state={:?} grounded={} pos=({:.2}, {:.2}, {:.2})",
                sim.frames(),
                report.speed_text(),
                report.state,
                report.grounded,
                pos[0],
                pos[1],
                pos[2]
            );
        }
    }

    println!(
        "Ran {} frames ({} fixed steps), top speed {:.1} km/h",
        sim.frames(),
        sim.fixed_steps(),
        top_speed
    );
}

fn print_defaults() {
    match ControllerConfig::default().to_toml_string() {
        Ok(text) => print!("{}", text),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
