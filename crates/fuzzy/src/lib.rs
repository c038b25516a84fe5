#![deny(unsafe_code)]
//! Table-driven fuzzy inference for balancing an inverted pendulum.
//!
//! The controller maps two composite inputs — an angle/angle-rate blend and
//! a position/velocity blend — to a crisp control force in three stages:
//! fuzzification through trapezoidal membership functions, min-composition
//! over a fixed 25-rule table, and weighted-average defuzzification over
//! output singletons.
//!
//! All state is built once and read-only afterwards; see
//! [`FuzzyController::balance`] for the reference configuration.

pub mod controller;
pub mod membership;
pub mod rules;

pub use controller::FuzzyController;
pub use membership::{InputRegion, InputVariable, Memberships, Trapezoid};
pub use rules::{OutputRegion, OutputTable, Rule, RuleBase};
