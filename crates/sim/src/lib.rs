#![deny(unsafe_code)]
//! Simulation layer for the cartpole balance system: dynamics integration,
//! the closed-loop driver, control-surface export, and the controller
//! registry.
//!
//! This crate sits between `cartpole-core` (which defines the `Controller`
//! trait) and the controller crates (`cartpole-fuzzy`). The CLI depends on
//! this crate so it never names a concrete controller type.

pub mod driver;
pub mod dynamics;
pub mod surface;

use cartpole_core::error::ControlError;
use cartpole_core::Controller;
use serde_json::Value;

/// All available controller names.
const CONTROLLER_NAMES: &[&str] = &["fuzzy"];

/// Enumeration of all available balance controllers.
///
/// Wraps each controller implementation and delegates `Controller` trait
/// methods. Use [`ControllerKind::from_name`] for string-based construction
/// from the CLI.
pub enum ControllerKind {
    /// Table-driven fuzzy inference.
    Fuzzy(cartpole_fuzzy::FuzzyController),
}

impl ControllerKind {
    /// Constructs a controller by name.
    ///
    /// Returns `ControlError::UnknownController` if the name is not
    /// recognized.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, ControlError> {
        match name {
            "fuzzy" => Ok(ControllerKind::Fuzzy(
                cartpole_fuzzy::FuzzyController::from_json(params)?,
            )),
            _ => Err(ControlError::UnknownController(name.to_string())),
        }
    }

    /// Returns a slice of all recognized controller names.
    pub fn list_controllers() -> &'static [&'static str] {
        CONTROLLER_NAMES
    }
}

impl Controller for ControllerKind {
    fn output(&self, inputs: [f64; 2]) -> Result<f64, ControlError> {
        match self {
            ControllerKind::Fuzzy(c) => c.output(inputs),
        }
    }

    fn params(&self) -> Value {
        match self {
            ControllerKind::Fuzzy(c) => c.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            ControllerKind::Fuzzy(c) => c.param_schema(),
        }
    }
}
