//! Control-surface sweep and CSV export.
//!
//! Samples the controller over an (angle, angle-rate) grid with the cart
//! pinned at the origin, producing the force landscape the rule table
//! encodes. Each cell is independent — the sweep shares the controller
//! read-only and touches no other state.

use cartpole_core::params::{param_f64, param_usize};
use cartpole_core::{BlendGains, CartPoleState, ControlError, Controller};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as _;
use std::path::Path;

/// Default angle half-range: 12 degrees.
const DEFAULT_MAX_ANGLE: f64 = 12.0 * std::f64::consts::PI / 180.0;
/// Default angle-rate half-range.
const DEFAULT_MAX_RATE: f64 = 0.3;
/// Default samples per axis.
const DEFAULT_SAMPLES: usize = 100;

/// Sampling window of a control-surface sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceSpec {
    /// Lowest sampled angle (radians).
    pub min_angle: f64,
    /// Highest angle bound (exclusive; see [`SurfaceSpec::samples`]).
    pub max_angle: f64,
    /// Lowest sampled angle rate.
    pub min_rate: f64,
    /// Highest angle-rate bound (exclusive).
    pub max_rate: f64,
    /// Samples per axis; sample `k` sits at `min + k * (max - min) / samples`,
    /// so the upper bound itself is never sampled.
    pub samples: usize,
}

impl Default for SurfaceSpec {
    fn default() -> Self {
        Self {
            min_angle: -DEFAULT_MAX_ANGLE,
            max_angle: DEFAULT_MAX_ANGLE,
            min_rate: -DEFAULT_MAX_RATE,
            max_rate: DEFAULT_MAX_RATE,
            samples: DEFAULT_SAMPLES,
        }
    }
}

impl SurfaceSpec {
    /// Extracts a window from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            min_angle: param_f64(params, "min_angle", defaults.min_angle),
            max_angle: param_f64(params, "max_angle", defaults.max_angle),
            min_rate: param_f64(params, "min_rate", defaults.min_rate),
            max_rate: param_f64(params, "max_rate", defaults.max_rate),
            samples: param_usize(params, "samples", defaults.samples),
        }
    }
}

/// A sampled `(angle, angle_rate) -> force` grid.
///
/// `forces[row][col]` is the force at `rates[row]`, `angles[col]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSurface {
    angles: Vec<f64>,
    rates: Vec<f64>,
    forces: Vec<Vec<f64>>,
}

impl ControlSurface {
    /// The angle samples (column coordinates).
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// The angle-rate samples (row coordinates).
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// The force grid, one row per angle-rate sample.
    pub fn forces(&self) -> &[Vec<f64>] {
        &self.forces
    }

    /// Writes the grid as CSV.
    ///
    /// First row: a `0.00` corner cell, then the angle samples. Each
    /// following row: its angle-rate sample, then that row's forces.
    pub fn write_csv(&self, path: &Path) -> Result<(), ControlError> {
        let mut out = String::from("0.00");
        for angle in &self.angles {
            // Writing to a String cannot fail.
            let _ = write!(out, ",{angle}");
        }
        out.push('\n');
        for (rate, row) in self.rates.iter().zip(&self.forces) {
            let _ = write!(out, "{rate}");
            for force in row {
                let _ = write!(out, ",{force}");
            }
            out.push('\n');
        }
        std::fs::write(path, out).map_err(|e| ControlError::Io(e.to_string()))
    }
}

/// Evaluates the controller over the sampling window.
///
/// Each cell builds a state with the cell's angle and angle rate, the cart
/// at rest at the origin, blends it into the composite inputs, and records
/// the inferred force. The first cell the controller cannot answer aborts
/// the sweep with its error.
pub fn sweep(
    controller: &dyn Controller,
    gains: &BlendGains,
    spec: &SurfaceSpec,
) -> Result<ControlSurface, ControlError> {
    if spec.samples == 0 {
        return Err(ControlError::EmptyGrid);
    }

    let n = spec.samples;
    let angle_inc = (spec.max_angle - spec.min_angle) / n as f64;
    let rate_inc = (spec.max_rate - spec.min_rate) / n as f64;

    let angles: Vec<f64> = (0..n).map(|k| spec.min_angle + k as f64 * angle_inc).collect();
    let rates: Vec<f64> = (0..n).map(|k| spec.min_rate + k as f64 * rate_inc).collect();

    let mut forces = Vec::with_capacity(n);
    for &rate in &rates {
        let mut row = Vec::with_capacity(n);
        for &angle in &angles {
            let state = CartPoleState {
                angle,
                angle_dot: rate,
                ..CartPoleState::default()
            };
            row.push(controller.output(gains.blend(&state))?);
        }
        forces.push(row);
    }

    Ok(ControlSurface {
        angles,
        rates,
        forces,
    })
}
