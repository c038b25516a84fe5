//! Trapezoidal membership functions and the per-variable fuzzy partitions.
//!
//! A [`Trapezoid`] maps a crisp scalar to a degree of membership in [0, 1].
//! [`Memberships`] holds the five regional trapezoids for each of the two
//! composite input variables and answers degree lookups during inference.

use cartpole_core::ControlError;

/// Which composite input a fuzzy set (or rule antecedent) reads.
///
/// The two-composite design is fixed: every rule fuzzifies the angle blend
/// and the position blend, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputVariable {
    /// `angle_gain * theta + angle_rate_gain * theta_dot`.
    AngleBlend,
    /// `position_gain * x + position_rate_gain * x_dot`.
    PositionBlend,
}

impl InputVariable {
    /// Position of this variable in the controller's input vector.
    pub fn index(self) -> usize {
        match self {
            InputVariable::AngleBlend => 0,
            InputVariable::PositionBlend => 1,
        }
    }
}

/// Linguistic region of an input variable, most negative to most positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputRegion {
    NegMedium,
    NegSmall,
    Zero,
    PosSmall,
    PosMedium,
}

impl InputRegion {
    /// All regions in ascending order.
    pub const ALL: [InputRegion; 5] = [
        InputRegion::NegMedium,
        InputRegion::NegSmall,
        InputRegion::Zero,
        InputRegion::PosSmall,
        InputRegion::PosMedium,
    ];

    /// Index of this region in [`InputRegion::ALL`].
    pub fn rank(self) -> usize {
        self as usize
    }
}

/// Piecewise-linear membership function.
///
/// Each variant carries only the breakpoints it needs plus its slopes,
/// precomputed at construction so evaluation is branch-and-multiply only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trapezoid {
    /// Left shoulder: degree 1 at or below `a`, falling to 0 at `b`.
    Left { a: f64, b: f64, slope: f64 },
    /// Right shoulder: degree 0 at or below `a`, rising to 1 at `b`.
    Right { a: f64, b: f64, slope: f64 },
    /// Full trapezoid: 0 outside `(a, d)`, 1 on `[b, c]`, linear ramps between.
    Regular {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        l_slope: f64,
        r_slope: f64,
    },
}

impl Trapezoid {
    /// Left shoulder falling from 1 to 0 over `(a, b)`.
    ///
    /// Returns `ControlError::DegenerateRamp` unless `a < b`.
    pub fn left(a: f64, b: f64) -> Result<Self, ControlError> {
        if a >= b {
            return Err(ControlError::DegenerateRamp { lo: a, hi: b });
        }
        Ok(Trapezoid::Left {
            a,
            b,
            slope: 1.0 / (a - b),
        })
    }

    /// Right shoulder rising from 0 to 1 over `(a, b)`.
    ///
    /// Returns `ControlError::DegenerateRamp` unless `a < b`.
    pub fn right(a: f64, b: f64) -> Result<Self, ControlError> {
        if a >= b {
            return Err(ControlError::DegenerateRamp { lo: a, hi: b });
        }
        Ok(Trapezoid::Right {
            a,
            b,
            slope: 1.0 / (b - a),
        })
    }

    /// Full trapezoid with support `(a, d)` and plateau `[b, c]`.
    ///
    /// The plateau may collapse (`b == c`, a triangle) but both ramps must
    /// have nonzero width: `a < b` and `c < d`, with `b <= c`. Zero-width
    /// ramps are `ControlError::DegenerateRamp`; any other ordering
    /// violation is `ControlError::BreakpointOrder`.
    pub fn regular(a: f64, b: f64, c: f64, d: f64) -> Result<Self, ControlError> {
        if a == b {
            return Err(ControlError::DegenerateRamp { lo: a, hi: b });
        }
        if c == d {
            return Err(ControlError::DegenerateRamp { lo: c, hi: d });
        }
        if !(a < b && b <= c && c < d) {
            return Err(ControlError::BreakpointOrder { a, b, c, d });
        }
        Ok(Trapezoid::Regular {
            a,
            b,
            c,
            d,
            l_slope: 1.0 / (b - a),
            r_slope: 1.0 / (c - d),
        })
    }

    /// Degree of membership of `x`, always in `[0, 1]`.
    pub fn degree(&self, x: f64) -> f64 {
        match *self {
            Trapezoid::Left { a, b, slope } => {
                if x <= a {
                    1.0
                } else if x >= b {
                    0.0
                } else {
                    slope * (x - b)
                }
            }
            Trapezoid::Right { a, b, slope } => {
                if x <= a {
                    0.0
                } else if x >= b {
                    1.0
                } else {
                    slope * (x - a)
                }
            }
            Trapezoid::Regular {
                a,
                b,
                c,
                d,
                l_slope,
                r_slope,
            } => {
                if x <= a || x >= d {
                    0.0
                } else if x >= b && x <= c {
                    1.0
                } else if x < b {
                    l_slope * (x - a)
                } else {
                    r_slope * (x - d)
                }
            }
        }
    }
}

/// The five regional trapezoids for each composite input variable.
///
/// Immutable after construction; inference only reads it, so it can be
/// shared freely across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Memberships {
    angle: [Trapezoid; 5],
    position: [Trapezoid; 5],
}

impl Memberships {
    /// Builds a partition from explicit trapezoids, one per region in
    /// [`InputRegion::ALL`] order.
    pub fn new(angle: [Trapezoid; 5], position: [Trapezoid; 5]) -> Self {
        Self { angle, position }
    }

    /// The reference balance partition.
    ///
    /// Breakpoints for the angle blend span [-0.18, 0.18] and for the
    /// position blend [-2, 2]; both partitions are mirror-symmetric and the
    /// outer shoulders extend to infinity, so every real input belongs to
    /// at least one region.
    pub fn balance() -> Result<Self, ControlError> {
        let angle = [
            Trapezoid::left(-0.18, -0.12)?,
            Trapezoid::regular(-0.18, -0.12, -0.06, 0.0)?,
            Trapezoid::regular(-0.06, 0.0, 0.0, 0.06)?,
            Trapezoid::regular(0.0, 0.06, 0.12, 0.18)?,
            Trapezoid::right(0.12, 0.18)?,
        ];
        let position = [
            Trapezoid::left(-2.0, -1.8)?,
            Trapezoid::regular(-2.0, -1.8, -0.8, 0.0)?,
            Trapezoid::regular(-0.6, 0.0, 0.0, 0.6)?,
            Trapezoid::regular(0.0, 0.8, 1.8, 2.0)?,
            Trapezoid::right(1.8, 2.0)?,
        ];
        Ok(Self::new(angle, position))
    }

    /// The trapezoid for `region` of `var`.
    pub fn trapezoid(&self, var: InputVariable, region: InputRegion) -> &Trapezoid {
        match var {
            InputVariable::AngleBlend => &self.angle[region.rank()],
            InputVariable::PositionBlend => &self.position[region.rank()],
        }
    }

    /// Degree of membership of `x` in `region` of `var`.
    pub fn degree(&self, var: InputVariable, region: InputRegion, x: f64) -> f64 {
        self.trapezoid(var, region).degree(x)
    }
}
