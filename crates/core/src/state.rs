//! Physical state of the cart-pole system and its configuration values.
//!
//! `CartPoleState` is the per-tick mutable snapshot; `CartPoleParams` holds
//! the physical constants (they never vary per instance, so they live in a
//! separate immutable value passed alongside the state); `BlendGains` folds
//! a state variable and its rate into the single composite scalar each fuzzy
//! input consumes.

use crate::params::param_f64;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default pole point-mass in kg.
const DEFAULT_POLE_MASS: f64 = 0.1;
/// Default gravitational acceleration in m/s^2.
const DEFAULT_GRAVITY: f64 = 9.8;
/// Default combined mass of cart and pole in kg.
const DEFAULT_TOTAL_MASS: f64 = 1.1;
/// Default half-length of the pole in m.
const DEFAULT_HALF_LENGTH: f64 = 0.5;

/// Default weight on the pole angle in the angle composite.
const DEFAULT_ANGLE_GAIN: f64 = 100.0;
/// Default weight on the angular velocity in the angle composite.
const DEFAULT_ANGLE_RATE_GAIN: f64 = 1.0;
/// Default weight on the cart position in the position composite.
const DEFAULT_POSITION_GAIN: f64 = 10.0;
/// Default weight on the cart velocity in the position composite.
const DEFAULT_POSITION_RATE_GAIN: f64 = 0.5;

/// Instantaneous state of the cart-pole system.
///
/// Positions and velocities are SI units; `angle` is radians from vertical,
/// positive toward the cart's positive x direction. `force` is the control
/// force applied during the tick that produced this state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartPoleState {
    /// Cart position.
    pub x: f64,
    /// Cart velocity.
    pub x_dot: f64,
    /// Cart acceleration.
    pub x_accel: f64,
    /// Pole angle from vertical.
    pub angle: f64,
    /// Pole angular velocity.
    pub angle_dot: f64,
    /// Pole angular acceleration.
    pub angle_accel: f64,
    /// Control force applied to the cart.
    pub force: f64,
}

impl CartPoleState {
    /// State at rest with the pole displaced to `angle` radians.
    pub fn with_angle(angle: f64) -> Self {
        Self {
            angle,
            ..Self::default()
        }
    }
}

/// Physical constants of the cart-pole plant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartPoleParams {
    /// Pole point-mass.
    pub pole_mass: f64,
    /// Gravitational acceleration.
    pub gravity: f64,
    /// Combined mass of cart and pole.
    pub total_mass: f64,
    /// Half-length of the pole.
    pub half_length: f64,
}

impl Default for CartPoleParams {
    fn default() -> Self {
        Self {
            pole_mass: DEFAULT_POLE_MASS,
            gravity: DEFAULT_GRAVITY,
            total_mass: DEFAULT_TOTAL_MASS,
            half_length: DEFAULT_HALF_LENGTH,
        }
    }
}

impl CartPoleParams {
    /// Extracts constants from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            pole_mass: param_f64(params, "pole_mass", DEFAULT_POLE_MASS),
            gravity: param_f64(params, "gravity", DEFAULT_GRAVITY),
            total_mass: param_f64(params, "total_mass", DEFAULT_TOTAL_MASS),
            half_length: param_f64(params, "half_length", DEFAULT_HALF_LENGTH),
        }
    }
}

/// Gains that blend a state variable with its rate of change into one
/// composite fuzzy input.
///
/// Collapsing (angle, angle rate) and (position, velocity) into two scalars
/// keeps the rule base two-dimensional: 5 x 5 rules instead of 5^4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendGains {
    /// Weight on the pole angle.
    pub angle: f64,
    /// Weight on the angular velocity.
    pub angle_rate: f64,
    /// Weight on the cart position.
    pub position: f64,
    /// Weight on the cart velocity.
    pub position_rate: f64,
}

impl Default for BlendGains {
    fn default() -> Self {
        Self {
            angle: DEFAULT_ANGLE_GAIN,
            angle_rate: DEFAULT_ANGLE_RATE_GAIN,
            position: DEFAULT_POSITION_GAIN,
            position_rate: DEFAULT_POSITION_RATE_GAIN,
        }
    }
}

impl BlendGains {
    /// Extracts gains from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            angle: param_f64(params, "angle_gain", DEFAULT_ANGLE_GAIN),
            angle_rate: param_f64(params, "angle_rate_gain", DEFAULT_ANGLE_RATE_GAIN),
            position: param_f64(params, "position_gain", DEFAULT_POSITION_GAIN),
            position_rate: param_f64(params, "position_rate_gain", DEFAULT_POSITION_RATE_GAIN),
        }
    }

    /// The angle composite: `angle_gain * theta + angle_rate_gain * theta_dot`.
    pub fn angle_blend(&self, state: &CartPoleState) -> f64 {
        self.angle * state.angle + self.angle_rate * state.angle_dot
    }

    /// The position composite: `position_gain * x + position_rate_gain * x_dot`.
    pub fn position_blend(&self, state: &CartPoleState) -> f64 {
        self.position * state.x + self.position_rate * state.x_dot
    }

    /// Both composites in controller input order: `[angle, position]`.
    pub fn blend(&self, state: &CartPoleState) -> [f64; 2] {
        [self.angle_blend(state), self.position_blend(state)]
    }
}
