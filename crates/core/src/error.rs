//! Error types for the cartpole core.

use thiserror::Error;

/// Errors produced by controller construction, inference, and export.
#[derive(Debug, Error)]
pub enum ControlError {
    /// A trapezoid ramp had zero or negative width at construction. The
    /// slope would be infinite (or flipped), so the shape is rejected before
    /// the engine can be built.
    #[error("degenerate trapezoid ramp: breakpoints ({lo}, {hi}) do not strictly increase")]
    DegenerateRamp { lo: f64, hi: f64 },

    /// Regular trapezoid breakpoints were not in `a <= b <= c <= d` order.
    #[error("trapezoid breakpoints out of order: ({a}, {b}, {c}, {d})")]
    BreakpointOrder { a: f64, b: f64, c: f64, d: f64 },

    /// No rule fired with nonzero strength for the given input pair, so the
    /// weighted average is undefined. The caller chooses the recovery policy
    /// (hold the previous force, treat as zero, abort).
    #[error("no rule fired for inputs (angle {angle}, position {position}); crisp output undefined")]
    NoRuleFired { angle: f64, position: f64 },

    /// A requested controller name was not found in the registry.
    #[error("unknown controller: {0}")]
    UnknownController(String),

    /// A control-surface sweep was requested with zero samples.
    #[error("control surface grid must have at least one sample per axis")]
    EmptyGrid,

    /// A file write failed while exporting results.
    #[error("i/o error: {0}")]
    Io(String),
}
