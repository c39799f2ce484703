//! The score holder: a mutable accumulator with an undo protocol.

mod ledger;


use std::collections::HashMap;

use planshift_core::{ConstraintRef, Score, ScoreValue};

use crate::error::HolderError;

pub use ledger::{ConstraintMatch, ConstraintMatchTotal};

/// Opaque handle naming one evaluation context.
///
/// An evaluation context is the set of facts whose retraction must roll
/// back the match it produced - in rule-engine terms, one activation. The
/// constraint-evaluation layer allocates these and guarantees a live
/// handle is never reused until its match has been undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchContext(pub u64);

/// The pending reversal for one live constraint match.
///
/// A tagged record rather than a closure: it captures the exact weight to
/// subtract, so undo restores the pre-add magnitude without recomputation
/// (and without rounding drift on decimal levels).
#[derive(Debug, Clone, Copy)]
struct Reversal<V> {
    level_index: usize,
    weight: V,
}

/// Mutable, per-calculation-pass score accumulator.
///
/// Constraint evaluation writes into the holder as facts are asserted and
/// retracted: every add registers exactly one undo action keyed by its
/// evaluation context, and retraction triggers that undo. The sum of all
/// not-yet-undone adds always equals the current per-level magnitudes, so
/// score maintenance costs O(changed matches) instead of O(all
/// constraints).
///
/// A holder is exclusively owned by one score director and never shared
/// across threads; a child thread's director gets an independent holder
/// with the same level layout.
///
/// # Example
///
/// ```
/// use planshift_core::ConstraintRef;
/// use planshift_scoring::{MatchContext, ScoreHolder};
///
/// let conflict = ConstraintRef::new("", "Conflict");
/// let mut holder = ScoreHolder::<i64>::new(1, 1);
/// holder
///     .add_hard_constraint_match(MatchContext(1), &conflict, 0, -5)
///     .unwrap();
///
/// let score = holder.extract_score(0);
/// assert!(!score.is_feasible());
///
/// holder.undo(MatchContext(1)).unwrap();
/// assert!(holder.extract_score(0).is_feasible());
/// ```
pub struct ScoreHolder<V: ScoreValue> {
    hard_scores: Vec<V>,
    soft_scores: Vec<V>,
    undo_registry: HashMap<MatchContext, Reversal<V>>,
    /// Present only when constraint-match explanation is enabled.
    ledger: Option<HashMap<MatchContext, ConstraintMatch<V>>>,
}

impl<V: ScoreValue> ScoreHolder<V> {
    /// Creates a holder with all levels at zero.
    pub fn new(hard_levels: usize, soft_levels: usize) -> Self {
        ScoreHolder {
            hard_scores: vec![V::zero(); hard_levels],
            soft_scores: vec![V::zero(); soft_levels],
            undo_registry: HashMap::new(),
            ledger: None,
        }
    }

    /// Enables the constraint-match ledger.
    ///
    /// Tracking costs one ledger entry per live match; leave it off in
    /// hot solving runs and turn it on for score explanation.
    pub fn with_constraint_match_tracking(mut self) -> Self {
        self.ledger = Some(HashMap::new());
        self
    }

    /// Returns true if the constraint-match ledger is enabled.
    pub fn constraint_match_tracking_enabled(&self) -> bool {
        self.ledger.is_some()
    }

    /// Returns the number of hard levels.
    pub fn hard_level_count(&self) -> usize {
        self.hard_scores.len()
    }

    /// Returns the number of soft levels.
    pub fn soft_level_count(&self) -> usize {
        self.soft_scores.len()
    }

    /// Total number of levels, hard levels first in flat indexing.
    pub fn level_count(&self) -> usize {
        self.hard_scores.len() + self.soft_scores.len()
    }

    /// Returns the running magnitude of a hard level.
    ///
    /// # Panics
    /// Panics if the level is out of bounds.
    pub fn hard_score(&self, hard_level: usize) -> V {
        self.hard_scores[hard_level]
    }

    /// Returns the running magnitude of a soft level.
    ///
    /// # Panics
    /// Panics if the level is out of bounds.
    pub fn soft_score(&self, soft_level: usize) -> V {
        self.soft_scores[soft_level]
    }

    /// Number of matches whose undo has not run yet.
    pub fn pending_match_count(&self) -> usize {
        self.undo_registry.len()
    }

    /// Adds `weight` to a hard level and registers the paired undo.
    ///
    /// `weight` is negative for a penalty, positive for a reward.
    pub fn add_hard_constraint_match(
        &mut self,
        context: MatchContext,
        constraint: &ConstraintRef,
        hard_level: usize,
        weight: V,
    ) -> Result<(), HolderError> {
        if hard_level >= self.hard_scores.len() {
            return Err(HolderError::LevelIndexOutOfRange {
                index: hard_level,
                level_count: self.hard_scores.len(),
            });
        }
        self.register(context, constraint, hard_level, weight)
    }

    /// Adds `weight` to a soft level and registers the paired undo.
    pub fn add_soft_constraint_match(
        &mut self,
        context: MatchContext,
        constraint: &ConstraintRef,
        soft_level: usize,
        weight: V,
    ) -> Result<(), HolderError> {
        if soft_level >= self.soft_scores.len() {
            return Err(HolderError::LevelIndexOutOfRange {
                index: soft_level,
                level_count: self.soft_scores.len(),
            });
        }
        self.register(context, constraint, self.hard_scores.len() + soft_level, weight)
    }

    /// Adds `weight` at a flat level index (hard levels first).
    pub fn add_constraint_match(
        &mut self,
        context: MatchContext,
        constraint: &ConstraintRef,
        level_index: usize,
        weight: V,
    ) -> Result<(), HolderError> {
        if level_index >= self.level_count() {
            return Err(HolderError::LevelIndexOutOfRange {
                index: level_index,
                level_count: self.level_count(),
            });
        }
        self.register(context, constraint, level_index, weight)
    }

    fn register(
        &mut self,
        context: MatchContext,
        constraint: &ConstraintRef,
        level_index: usize,
        weight: V,
    ) -> Result<(), HolderError> {
        if self.undo_registry.contains_key(&context) {
            return Err(HolderError::DoubleRegistration { context });
        }
        let current = self.level_mut(level_index);
        *current = current
            .checked_add(weight)
            .ok_or(HolderError::ArithmeticOverflow { level_index })?;
        self.undo_registry.insert(
            context,
            Reversal {
                level_index,
                weight,
            },
        );
        if let Some(ledger) = &mut self.ledger {
            ledger.insert(
                context,
                ConstraintMatch {
                    constraint: constraint.clone(),
                    level_index,
                    weight,
                },
            );
        }
        Ok(())
    }

    /// Rolls back the match registered for `context`.
    ///
    /// Subtracts the exact stored weight, never a recomputed one. Invoked
    /// when the evaluation context that produced the match is retracted.
    pub fn undo(&mut self, context: MatchContext) -> Result<(), HolderError> {
        let reversal = self
            .undo_registry
            .remove(&context)
            .ok_or(HolderError::UnknownContext { context })?;
        let current = self.level_mut(reversal.level_index);
        *current = current
            .checked_sub(reversal.weight)
            .ok_or(HolderError::ArithmeticOverflow {
                level_index: reversal.level_index,
            })?;
        if let Some(ledger) = &mut self.ledger {
            ledger.remove(&context);
        }
        Ok(())
    }

    /// Snapshots the current magnitudes into an immutable [`Score`].
    ///
    /// A pure read: accumulator state persists for subsequent incremental
    /// updates.
    ///
    /// # Panics
    /// Panics if `init_score` is positive.
    pub fn extract_score(&self, init_score: i32) -> Score<V> {
        Score::of(
            init_score,
            self.hard_scores.clone(),
            self.soft_scores.clone(),
        )
    }

    /// Zeroes all levels and drops every pending undo and ledger entry.
    ///
    /// The level layout is preserved.
    pub fn reset(&mut self) {
        for level in self.hard_scores.iter_mut().chain(self.soft_scores.iter_mut()) {
            *level = V::zero();
        }
        self.undo_registry.clear();
        if let Some(ledger) = &mut self.ledger {
            ledger.clear();
        }
    }

    /// Per-constraint, per-level totals of the live (not yet undone)
    /// matches. `None` when tracking is disabled.
    pub fn constraint_match_totals(&self) -> Option<Vec<ConstraintMatchTotal<V>>> {
        let ledger = self.ledger.as_ref()?;
        let mut totals: HashMap<(String, usize), ConstraintMatchTotal<V>> = HashMap::new();
        for m in ledger.values() {
            let entry = totals
                .entry((m.constraint.full_name(), m.level_index))
                .or_insert_with(|| ConstraintMatchTotal {
                    constraint: m.constraint.clone(),
                    level_index: m.level_index,
                    match_count: 0,
                    weight_total: V::zero(),
                });
            entry.match_count += 1;
            entry.weight_total = entry.weight_total + m.weight;
        }
        let mut totals: Vec<_> = totals.into_values().collect();
        totals.sort_by(|a, b| {
            a.constraint
                .full_name()
                .cmp(&b.constraint.full_name())
                .then(a.level_index.cmp(&b.level_index))
        });
        Some(totals)
    }

    fn level_mut(&mut self, level_index: usize) -> &mut V {
        let hard_count = self.hard_scores.len();
        if level_index < hard_count {
            &mut self.hard_scores[level_index]
        } else {
            &mut self.soft_scores[level_index - hard_count]
        }
    }
}
