//! The core `Controller` trait that every balance controller must implement.
//!
//! The trait is object-safe so controllers can be used as `dyn Controller`
//! for runtime switching between control strategies.

use crate::error::ControlError;
use serde_json::Value;

/// Core trait for balance controllers.
///
/// A controller consumes the two composite inputs produced by
/// [`BlendGains::blend`](crate::state::BlendGains::blend) — the angle
/// composite at index 0 and the position composite at index 1 — and yields
/// one crisp control force.
///
/// This trait is **object-safe**: you can use `Box<dyn Controller>` or
/// `&dyn Controller` for runtime polymorphism.
pub trait Controller {
    /// Crisp control force for the given composite inputs.
    ///
    /// Returns `ControlError::NoRuleFired` when the controller cannot
    /// produce a defined output for the input pair.
    fn output(&self, inputs: [f64; 2]) -> Result<f64, ControlError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
