//! The fixed rule table and output singleton values for balance control.
//!
//! The rule base is the Cartesian product of the two composite variables'
//! five regions: 25 rules, each with a consequent read from a fixed 5x5
//! associative-memory table. Built once, read-only thereafter.

use crate::membership::{InputRegion, InputVariable};

/// Linguistic region of the output force, most negative to most positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputRegion {
    NegVeryLarge,
    NegLarge,
    NegMedium,
    NegSmall,
    Zero,
    PosSmall,
    PosMedium,
    PosLarge,
    PosVeryLarge,
}

impl OutputRegion {
    /// All output regions in ascending order.
    pub const ALL: [OutputRegion; 9] = [
        OutputRegion::NegVeryLarge,
        OutputRegion::NegLarge,
        OutputRegion::NegMedium,
        OutputRegion::NegSmall,
        OutputRegion::Zero,
        OutputRegion::PosSmall,
        OutputRegion::PosMedium,
        OutputRegion::PosLarge,
        OutputRegion::PosVeryLarge,
    ];

    /// Index of this region in [`OutputRegion::ALL`].
    pub fn rank(self) -> usize {
        self as usize
    }
}

/// One inference rule: two antecedents ANDed together, one consequent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    /// `(variable, region)` pairs; the variable selects which composite
    /// input to fuzzify, the region selects the trapezoid.
    pub antecedents: [(InputVariable, InputRegion); 2],
    /// Output region whose singleton value this rule votes for.
    pub consequent: OutputRegion,
}

/// Position-region iteration order of the reference table: most positive
/// first. Table rows are indexed by this order.
const POSITION_ORDER: [InputRegion; 5] = [
    InputRegion::PosMedium,
    InputRegion::PosSmall,
    InputRegion::Zero,
    InputRegion::NegSmall,
    InputRegion::NegMedium,
];

/// The balance FAMM: rows follow [`POSITION_ORDER`], columns follow
/// [`InputRegion::ALL`] for the angle blend.
const FAMM: [[OutputRegion; 5]; 5] = {
    use OutputRegion::*;
    [
        [NegSmall, NegSmall, PosSmall, PosLarge, PosVeryLarge],
        [NegSmall, NegSmall, Zero, PosMedium, PosLarge],
        [NegMedium, Zero, Zero, Zero, PosMedium],
        [NegLarge, NegMedium, Zero, PosSmall, PosSmall],
        [NegVeryLarge, NegLarge, NegSmall, PosSmall, PosSmall],
    ]
};

/// An ordered, immutable collection of [`Rule`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Builds the 25-rule balance table.
    ///
    /// Deterministic enumeration: angle regions ascending as the outer
    /// loop, position regions in [`POSITION_ORDER`] as the inner loop, so
    /// the rule at index `5 * angle_rank + position_rank` has consequent
    /// `FAMM[position_rank][angle_rank]`.
    pub fn balance() -> Self {
        let mut rules = Vec::with_capacity(InputRegion::ALL.len() * POSITION_ORDER.len());
        for (angle_rank, &angle_region) in InputRegion::ALL.iter().enumerate() {
            for (position_rank, &position_region) in POSITION_ORDER.iter().enumerate() {
                rules.push(Rule {
                    antecedents: [
                        (InputVariable::AngleBlend, angle_region),
                        (InputVariable::PositionBlend, position_region),
                    ],
                    consequent: FAMM[position_rank][angle_rank],
                });
            }
        }
        Self { rules }
    }

    /// Builds a rule base from an explicit rule sequence.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The rules in construction order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the rule base is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Crisp singleton value for each output region, used by height-method
/// defuzzification.
///
/// By convention the values ascend from most negative to most positive;
/// this is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputTable {
    values: [f64; 9],
}

impl OutputTable {
    /// Builds a table from explicit singleton values in
    /// [`OutputRegion::ALL`] order.
    pub fn new(values: [f64; 9]) -> Self {
        Self { values }
    }

    /// Builds the symmetric ladder `-4*step .. 4*step` centered on zero.
    ///
    /// The reference configuration uses `step = 15`, giving
    /// -60, -45, -30, -15, 0, 15, 30, 45, 60.
    pub fn ladder(step: f64) -> Self {
        let mut values = [0.0; 9];
        for (i, v) in values.iter_mut().enumerate() {
            *v = (i as f64 - 4.0) * step;
        }
        Self { values }
    }

    /// The singleton value for `region`.
    pub fn value(&self, region: OutputRegion) -> f64 {
        self.values[region.rank()]
    }

    /// All singleton values in [`OutputRegion::ALL`] order.
    pub fn values(&self) -> &[f64; 9] {
        &self.values
    }
}

impl Default for OutputTable {
    fn default() -> Self {
        Self::ladder(15.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Rule base construction ----

    #[test]
    fn balance_has_25_rules() {
        assert_eq!(RuleBase::balance().len(), 25);
    }

    #[test]
    fn balance_is_deterministic() {
        assert_eq!(RuleBase::balance(), RuleBase::balance());
    }

    #[test]
    fn rule_index_contract_holds() {
        let base = RuleBase::balance();
        for (angle_rank, &angle_region) in InputRegion::ALL.iter().enumerate() {
            for (position_rank, &position_region) in POSITION_ORDER.iter().enumerate() {
                let rule = &base.rules()[5 * angle_rank + position_rank];
                assert_eq!(rule.antecedents[0], (InputVariable::AngleBlend, angle_region));
                assert_eq!(
                    rule.antecedents[1],
                    (InputVariable::PositionBlend, position_region)
                );
                assert_eq!(rule.consequent, FAMM[position_rank][angle_rank]);
            }
        }
    }

    #[test]
    fn every_rule_reads_both_composite_variables() {
        for rule in RuleBase::balance().rules() {
            assert_eq!(rule.antecedents[0].0, InputVariable::AngleBlend);
            assert_eq!(rule.antecedents[1].0, InputVariable::PositionBlend);
        }
    }

    #[test]
    fn first_and_last_rules_match_the_reference_table() {
        let base = RuleBase::balance();
        // Rule 0: angle NM, position PM -> NS.
        assert_eq!(base.rules()[0].consequent, OutputRegion::NegSmall);
        // Rule 12: angle ZE, position ZE -> ZE.
        assert_eq!(base.rules()[12].consequent, OutputRegion::Zero);
        // Rule 24: angle PM, position NM -> PS.
        assert_eq!(base.rules()[24].consequent, OutputRegion::PosSmall);
    }

    #[test]
    fn custom_rule_bases_are_allowed() {
        let rules = vec![Rule {
            antecedents: [
                (InputVariable::AngleBlend, InputRegion::Zero),
                (InputVariable::PositionBlend, InputRegion::Zero),
            ],
            consequent: OutputRegion::Zero,
        }];
        let base = RuleBase::new(rules);
        assert_eq!(base.len(), 1);
        assert!(!base.is_empty());
    }

    #[test]
    fn famm_is_antisymmetric_under_input_negation() {
        // Negating both inputs mirrors the cell to [4-p][4-a]; the designed
        // table maps each consequent to its sign-mirrored region.
        let out = OutputTable::default();
        for p in 0..5 {
            for a in 0..5 {
                let v = out.value(FAMM[p][a]);
                let mirrored = out.value(FAMM[4 - p][4 - a]);
                assert!(
                    (v + mirrored).abs() < 1e-12,
                    "cell ({p}, {a}): {v} vs {mirrored}"
                );
            }
        }
    }

    // ---- Output table ----

    #[test]
    fn default_ladder_matches_reference_values() {
        let out = OutputTable::default();
        let expected = [-60.0, -45.0, -30.0, -15.0, 0.0, 15.0, 30.0, 45.0, 60.0];
        assert_eq!(out.values(), &expected);
    }

    #[test]
    fn ladder_center_is_exactly_zero() {
        assert_eq!(OutputTable::ladder(7.5).value(OutputRegion::Zero), 0.0);
    }

    #[test]
    fn ladder_values_ascend() {
        let out = OutputTable::ladder(15.0);
        for pair in out.values().windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn explicit_values_are_returned_verbatim() {
        let values = [-9.0, -7.0, -5.0, -3.0, 0.0, 3.0, 5.0, 7.0, 9.0];
        let out = OutputTable::new(values);
        assert_eq!(out.value(OutputRegion::NegVeryLarge), -9.0);
        assert_eq!(out.value(OutputRegion::PosVeryLarge), 9.0);
    }

    #[test]
    fn output_ranks_are_ascending() {
        for (i, region) in OutputRegion::ALL.iter().enumerate() {
            assert_eq!(region.rank(), i);
        }
    }
}
