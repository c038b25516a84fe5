//! Closed-loop simulation driver.
//!
//! Each tick: blend the previous state into the two composite inputs, ask
//! the controller for a force, apply an external override if one is armed,
//! and advance the dynamics one Euler step. Previous and new states are
//! distinct values — the driver never aliases them.

use crate::dynamics;
use cartpole_core::params::{param_f64, param_usize};
use cartpole_core::{BlendGains, CartPoleParams, CartPoleState, ControlError, Controller};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as _;
use std::path::Path;

/// Reference integration step.
const DEFAULT_DT: f64 = 0.002;
/// Default number of closed-loop ticks.
const DEFAULT_STEPS: usize = 5000;
/// Reference initial pole displacement: 8 degrees.
const DEFAULT_INITIAL_ANGLE: f64 = 8.0 * std::f64::consts::PI / 180.0;

/// Configuration of a closed-loop run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimConfig {
    /// Integration step.
    pub dt: f64,
    /// Number of ticks to run.
    pub steps: usize,
    /// Initial pole angle in radians.
    pub initial_angle: f64,
    /// Composite-input gains.
    pub gains: BlendGains,
    /// Physical constants of the plant.
    pub plant: CartPoleParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            steps: DEFAULT_STEPS,
            initial_angle: DEFAULT_INITIAL_ANGLE,
            gains: BlendGains::default(),
            plant: CartPoleParams::default(),
        }
    }
}

impl SimConfig {
    /// Extracts a configuration from a JSON object, falling back to
    /// defaults. Gains and plant constants read their own keys from the
    /// same object.
    pub fn from_json(params: &Value) -> Self {
        Self {
            dt: param_f64(params, "dt", DEFAULT_DT),
            steps: param_usize(params, "steps", DEFAULT_STEPS),
            initial_angle: param_f64(params, "initial_angle", DEFAULT_INITIAL_ANGLE),
            gains: BlendGains::from_json(params),
            plant: CartPoleParams::from_json(params),
        }
    }
}

/// One recorded tick of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySample {
    /// Simulation time in seconds.
    pub time: f64,
    /// State at that time.
    pub state: CartPoleState,
}

/// The recorded states of a closed-loop run, initial state included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    /// All samples in time order.
    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    /// The last recorded state.
    pub fn final_state(&self) -> &CartPoleState {
        // run() always records the initial state, so samples is non-empty.
        &self.samples[self.samples.len() - 1].state
    }

    /// Writes the trajectory as CSV: a header line, then one
    /// `time,x,x_dot,angle,angle_dot,force` row per sample.
    pub fn write_csv(&self, path: &Path) -> Result<(), ControlError> {
        let mut out = String::from("time,x,x_dot,angle,angle_dot,force\n");
        for sample in &self.samples {
            let s = &sample.state;
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{},{},{},{},{},{}",
                sample.time, s.x, s.x_dot, s.angle, s.angle_dot, s.force
            );
        }
        std::fs::write(path, out).map_err(|e| ControlError::Io(e.to_string()))
    }
}

/// A controller wired to a cart-pole plant.
pub struct Simulation<C: Controller> {
    controller: C,
    config: SimConfig,
    state: CartPoleState,
    elapsed: f64,
}

impl<C: Controller> Simulation<C> {
    /// Sets up a run from the configured initial displacement, at rest.
    pub fn new(controller: C, config: SimConfig) -> Self {
        Self {
            controller,
            config,
            state: CartPoleState::with_angle(config.initial_angle),
            elapsed: 0.0,
        }
    }

    /// The current state.
    pub fn state(&self) -> &CartPoleState {
        &self.state
    }

    /// Elapsed simulation time.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advances one tick.
    ///
    /// The controller is always consulted (so inference failures surface
    /// even under manual control); `override_force`, when present, replaces
    /// its output for this tick.
    pub fn tick(&mut self, override_force: Option<f64>) -> Result<&CartPoleState, ControlError> {
        let inputs = self.config.gains.blend(&self.state);
        let mut force = self.controller.output(inputs)?;
        if let Some(external) = override_force {
            force = external;
        }
        self.state = dynamics::step(&self.state, &self.config.plant, force, self.config.dt);
        self.elapsed += self.config.dt;
        Ok(&self.state)
    }

    /// Runs the configured number of ticks and records every state,
    /// the initial one included.
    ///
    /// `override_force` is applied on every tick when present (the
    /// programmatic stand-in for holding a manual-command key down).
    pub fn run(&mut self, override_force: Option<f64>) -> Result<Trajectory, ControlError> {
        let mut samples = Vec::with_capacity(self.config.steps + 1);
        samples.push(TrajectorySample {
            time: self.elapsed,
            state: self.state,
        });
        for _ in 0..self.config.steps {
            self.tick(override_force)?;
            samples.push(TrajectorySample {
                time: self.elapsed,
                state: self.state,
            });
        }
        Ok(Trajectory { samples })
    }
}
