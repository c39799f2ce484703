//! Core domain traits

use crate::score::{Score, ScoreValue};

/// Marker trait for planning solutions.
///
/// A planning solution represents both the problem definition and the
/// (potentially partial) solution. It contains:
/// - Problem facts: immutable input data
/// - Planning entities: things to be optimized
/// - Score: the quality of the current solution
///
/// # Example
///
/// ```
/// use planshift_core::{PlanningSolution, Score};
///
/// #[derive(Clone)]
/// struct NQueens {
///     rows: Vec<Option<usize>>,
///     score: Option<Score<i64>>,
/// }
///
/// impl PlanningSolution for NQueens {
///     type Value = i64;
///
///     fn score(&self) -> Option<&Score<i64>> {
///         self.score.as_ref()
///     }
///
///     fn set_score(&mut self, score: Option<Score<i64>>) {
///         self.score = score;
///     }
///
///     fn uninitialized_count(&self) -> usize {
///         self.rows.iter().filter(|r| r.is_none()).count()
///     }
/// }
/// ```
///
/// # Thread Safety
///
/// Planning solutions must be `Send + Sync` to support multi-threaded
/// solving; each solver thread owns an independent clone.
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    /// The numeric kind of this solution's score levels.
    type Value: ScoreValue;

    /// Returns the current score of this solution, if calculated.
    fn score(&self) -> Option<&Score<Self::Value>>;

    /// Sets the score of this solution.
    fn set_score(&mut self, score: Option<Score<Self::Value>>);

    /// Returns the number of planning entities that are still unassigned.
    ///
    /// This count feeds the init level of the score: a solution is
    /// initialized when it reaches zero.
    fn uninitialized_count(&self) -> usize {
        0
    }
}
