#![deny(unsafe_code)]
//! CLI binary for the cartpole balance simulator.
//!
//! Subcommands:
//! - `simulate` — run the closed loop N ticks, report the final state
//! - `surface` — sample the control surface, write CSV
//! - `list` — print available controllers

mod error;

use cartpole_core::BlendGains;
use cartpole_sim::driver::{SimConfig, Simulation};
use cartpole_sim::surface::{self, SurfaceSpec};
use cartpole_sim::ControllerKind;
use clap::{Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "cartpole", about = "Fuzzy-balanced inverted pendulum simulator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the closed-loop simulation and report the final state.
    Simulate {
        /// Controller name (e.g. "fuzzy").
        #[arg(short, long, default_value = "fuzzy")]
        controller: String,

        /// Number of simulation ticks.
        #[arg(short, long, default_value_t = 5000)]
        steps: usize,

        /// Integration step in seconds.
        #[arg(long, default_value_t = 0.002)]
        dt: f64,

        /// Initial pole angle in degrees.
        #[arg(short, long, default_value_t = 8.0)]
        angle_deg: f64,

        /// Constant external force replacing the controller output
        /// (manual operation).
        #[arg(long)]
        force_override: Option<f64>,

        /// Controller, gain, and plant parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Optional trajectory CSV output path.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sample the (angle, angle-rate) control surface and write it as CSV.
    Surface {
        /// Controller name (e.g. "fuzzy").
        #[arg(short, long, default_value = "fuzzy")]
        controller: String,

        /// Samples per grid axis.
        #[arg(short, long, default_value_t = 100)]
        samples: usize,

        /// Controller, gain, and window parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Output file path.
        #[arg(short, long, default_value = "data_angle_vs_angle_dot.csv")]
        output: PathBuf,
    },
    /// List available controllers.
    List,
}

fn parse_params(text: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(text).map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let controllers = ControllerKind::list_controllers();
            if cli.json {
                let info = serde_json::json!({"controllers": controllers});
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Controllers:");
                for name in controllers {
                    println!("  {name}");
                }
            }
        }
        Command::Simulate {
            controller,
            steps,
            dt,
            angle_deg,
            force_override,
            params,
            output,
        } => {
            let params = parse_params(&params)?;
            let ctl = ControllerKind::from_name(&controller, &params)?;

            let mut config = SimConfig::from_json(&params);
            config.steps = steps;
            config.dt = dt;
            config.initial_angle = angle_deg.to_radians();

            let mut sim = Simulation::new(ctl, config);
            let trajectory = sim.run(force_override)?;

            if let Some(path) = &output {
                trajectory.write_csv(path)?;
            }

            let last = trajectory.final_state();
            if cli.json {
                let info = serde_json::json!({
                    "controller": controller,
                    "steps": steps,
                    "dt": dt,
                    "elapsed": sim.elapsed(),
                    "final": last,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "final state after {steps} ticks ({:.3} s):",
                    sim.elapsed()
                );
                println!("  x     = {:>9.4}   x_dot     = {:>9.4}", last.x, last.x_dot);
                println!(
                    "  angle = {:>9.4}   angle_dot = {:>9.4}   ({:.2} deg)",
                    last.angle,
                    last.angle_dot,
                    last.angle.to_degrees()
                );
                println!("  force = {:>9.4}", last.force);
                if let Some(path) = &output {
                    eprintln!("trajectory written to {}", path.display());
                }
            }
        }
        Command::Surface {
            controller,
            samples,
            params,
            output,
        } => {
            let params = parse_params(&params)?;
            let ctl = ControllerKind::from_name(&controller, &params)?;
            let gains = BlendGains::from_json(&params);

            let mut spec = SurfaceSpec::from_json(&params);
            spec.samples = samples;

            let grid = surface::sweep(&ctl, &gains, &spec)?;
            grid.write_csv(&output)?;

            if cli.json {
                let info = serde_json::json!({
                    "controller": controller,
                    "samples": samples,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "sampled {samples}x{samples} control surface ({controller}) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
