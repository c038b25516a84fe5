#![deny(unsafe_code)]
//! Core types for the cartpole balance simulator.
//!
//! Provides the `Controller` trait, the `CartPoleState`/`CartPoleParams`
//! physical data model, `BlendGains` composite-input folding, the
//! `ControlError` taxonomy, and JSON parameter helpers.

pub mod controller;
pub mod error;
pub mod params;
pub mod state;

pub use controller::Controller;
pub use error::ControlError;
pub use state::{BlendGains, CartPoleParams, CartPoleState};
