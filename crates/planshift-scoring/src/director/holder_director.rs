//! Holder-backed score director.

use planshift_core::{PlanningSolution, Score};

use crate::holder::ScoreHolder;

use super::traits::{ChildThreadType, ScoreDirector};

/// A score director built on a [`ScoreHolder`].
///
/// The evaluator closure stands in for the external rule-matching layer:
/// it inspects the working solution and writes constraint matches into the
/// holder. [`calculate_score`](ScoreDirector::calculate_score) is the
/// from-scratch path used at phase boundaries; an incremental evaluation
/// session instead keeps its own match contexts, applies add/undo through
/// [`holder_mut`](Self::holder_mut) as facts change, and snapshots with
/// [`extract_current_score`](Self::extract_current_score).
pub struct HolderScoreDirector<S: PlanningSolution, E> {
    working_solution: S,
    holder: ScoreHolder<S::Value>,
    evaluator: E,
    calculation_count: u64,
}

impl<S, E> HolderScoreDirector<S, E>
where
    S: PlanningSolution,
    E: Fn(&S, &mut ScoreHolder<S::Value>) + Clone + Send + Sync,
{
    /// Creates a director with a zeroed holder of the given level layout.
    pub fn new(solution: S, hard_levels: usize, soft_levels: usize, evaluator: E) -> Self {
        HolderScoreDirector {
            working_solution: solution,
            holder: ScoreHolder::new(hard_levels, soft_levels),
            evaluator,
            calculation_count: 0,
        }
    }

    /// Enables constraint-match tracking on the underlying holder.
    pub fn with_constraint_match_tracking(mut self) -> Self {
        self.holder = self.holder.with_constraint_match_tracking();
        self
    }

    /// Returns the underlying accumulator.
    pub fn holder(&self) -> &ScoreHolder<S::Value> {
        &self.holder
    }

    /// Mutable access for an incremental evaluation session.
    pub fn holder_mut(&mut self) -> &mut ScoreHolder<S::Value> {
        &mut self.holder
    }

    /// Snapshots the accumulator as-is, without replaying evaluation.
    ///
    /// This is the incremental read: the session has already applied its
    /// add/undo deltas.
    pub fn extract_current_score(&mut self) -> Score<S::Value> {
        self.calculation_count += 1;
        let score = self.holder.extract_score(self.init_score());
        self.working_solution.set_score(Some(score.clone()));
        score
    }

    fn init_score(&self) -> i32 {
        -(self.working_solution.uninitialized_count() as i32)
    }
}

impl<S, E> ScoreDirector<S> for HolderScoreDirector<S, E>
where
    S: PlanningSolution,
    E: Fn(&S, &mut ScoreHolder<S::Value>) + Clone + Send + Sync,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        &mut self.working_solution
    }

    fn set_working_solution(&mut self, solution: S) {
        self.working_solution = solution;
        self.holder.reset();
    }

    fn calculate_score(&mut self) -> Score<S::Value> {
        self.holder.reset();
        (self.evaluator)(&self.working_solution, &mut self.holder);
        self.calculation_count += 1;
        let score = self.holder.extract_score(self.init_score());
        self.working_solution.set_score(Some(score.clone()));
        score
    }

    fn calculation_count(&self) -> u64 {
        self.calculation_count
    }

    fn create_child_thread_score_director(&self, _child_thread_type: ChildThreadType) -> Self {
        let mut holder = ScoreHolder::new(
            self.holder.hard_level_count(),
            self.holder.soft_level_count(),
        );
        if self.holder.constraint_match_tracking_enabled() {
            holder = holder.with_constraint_match_tracking();
        }
        HolderScoreDirector {
            working_solution: self.working_solution.clone(),
            holder,
            evaluator: self.evaluator.clone(),
            calculation_count: 0,
        }
    }
}
