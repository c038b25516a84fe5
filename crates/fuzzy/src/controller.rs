//! Mamdani-style fuzzy inference: min-composition of rule antecedents,
//! weighted-average (height method) defuzzification.

use crate::membership::Memberships;
use crate::rules::{OutputRegion, OutputTable, RuleBase};
use cartpole_core::params::param_f64;
use cartpole_core::{ControlError, Controller};
use serde_json::{json, Value};

/// Default spacing of the output singleton ladder.
pub const DEFAULT_FORCE_STEP: f64 = 15.0;

/// Firing-strength totals below this are treated as "no rule fired": the
/// weighted average would be a meaningless 0/0.
const MIN_TOTAL_STRENGTH: f64 = 1e-6;

/// Table-driven fuzzy controller.
///
/// Owns its membership partition, rule base, and output singleton table;
/// all three are immutable after construction, so a single controller can
/// serve any number of `infer` calls, including concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyController {
    memberships: Memberships,
    rules: RuleBase,
    outputs: OutputTable,
}

impl FuzzyController {
    /// Builds a controller from explicit parts.
    pub fn new(memberships: Memberships, rules: RuleBase, outputs: OutputTable) -> Self {
        Self {
            memberships,
            rules,
            outputs,
        }
    }

    /// The reference balance configuration: the mirror-symmetric membership
    /// partition, the 25-rule table, and the ±60 output ladder.
    pub fn balance() -> Result<Self, ControlError> {
        Ok(Self::new(
            Memberships::balance()?,
            RuleBase::balance(),
            OutputTable::ladder(DEFAULT_FORCE_STEP),
        ))
    }

    /// Builds the balance configuration with the `force_step` tunable read
    /// from a JSON object (default 15), scaling the output ladder.
    pub fn from_json(params: &Value) -> Result<Self, ControlError> {
        let step = param_f64(params, "force_step", DEFAULT_FORCE_STEP);
        Ok(Self::new(
            Memberships::balance()?,
            RuleBase::balance(),
            OutputTable::ladder(step),
        ))
    }

    /// Crisp control force for the input pair `[angle_blend, position_blend]`.
    ///
    /// For each rule: fuzzify both antecedents against the input each one
    /// selects, take the minimum as the firing strength, and accumulate
    /// `strength * singleton` and `strength`. The result is the weighted
    /// average. If the strength total is numerically zero no rule covers
    /// the inputs and `ControlError::NoRuleFired` is returned; the caller
    /// picks the recovery policy.
    pub fn infer(&self, inputs: [f64; 2]) -> Result<f64, ControlError> {
        let mut weighted_sum = 0.0;
        let mut strength_sum = 0.0;

        for rule in self.rules.rules() {
            let strength = rule
                .antecedents
                .iter()
                .map(|&(var, region)| self.memberships.degree(var, region, inputs[var.index()]))
                .fold(f64::INFINITY, f64::min);
            weighted_sum += strength * self.outputs.value(rule.consequent);
            strength_sum += strength;
        }

        if strength_sum.abs() < MIN_TOTAL_STRENGTH {
            return Err(ControlError::NoRuleFired {
                angle: inputs[0],
                position: inputs[1],
            });
        }

        Ok(weighted_sum / strength_sum)
    }

    /// Read-only access to the membership partition.
    pub fn memberships(&self) -> &Memberships {
        &self.memberships
    }

    /// Read-only access to the rule base.
    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// Read-only access to the output singleton table.
    pub fn outputs(&self) -> &OutputTable {
        &self.outputs
    }
}

impl Controller for FuzzyController {
    fn output(&self, inputs: [f64; 2]) -> Result<f64, ControlError> {
        self.infer(inputs)
    }

    /// Reports `force_step` as the positive-small singleton, which equals
    /// the ladder spacing for ladder-built tables.
    fn params(&self) -> Value {
        json!({
            "force_step": self.outputs.value(OutputRegion::PosSmall),
            "rules": self.rules.len(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "force_step": {
                "type": "number",
                "default": DEFAULT_FORCE_STEP,
                "min": 0.0,
                "max": 100.0,
                "description": "Spacing of the output singleton ladder (reference: 15)"
            }
        })
    }
}
