//! Constraint-match ledger entries for score explanation.

use planshift_core::{ConstraintRef, ImpactType, ScoreValue};

/// One live constraint match: which constraint fired, against which
/// evaluation context, contributing what weight to which level.
#[derive(Debug, Clone)]
pub struct ConstraintMatch<V> {
    /// The constraint that fired.
    pub constraint: ConstraintRef,
    /// Flat level index (hard levels first).
    pub level_index: usize,
    /// The contributed weight.
    pub weight: V,
}

impl<V: ScoreValue> ConstraintMatch<V> {
    /// Whether this match penalized or rewarded the score.
    pub fn impact_type(&self) -> ImpactType {
        if self.weight < V::zero() {
            ImpactType::Penalty
        } else {
            ImpactType::Reward
        }
    }
}

/// Aggregate of all live matches of one constraint on one level.
#[derive(Debug, Clone)]
pub struct ConstraintMatchTotal<V> {
    /// The constraint being aggregated.
    pub constraint: ConstraintRef,
    /// Flat level index (hard levels first).
    pub level_index: usize,
    /// Number of live matches.
    pub match_count: usize,
    /// Sum of the live matches' weights.
    pub weight_total: V,
}

impl<V: ScoreValue> ConstraintMatchTotal<V> {
    /// Net impact of this constraint on this level.
    pub fn impact_type(&self) -> ImpactType {
        if self.weight_total < V::zero() {
            ImpactType::Penalty
        } else {
            ImpactType::Reward
        }
    }
}
