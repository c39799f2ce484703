// Score director trait definition.

use planshift_core::{PlanningSolution, Score};

/// The kind of child thread a forked score director will serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildThreadType {
    /// A partition of a partitioned search run.
    PartThread,
    /// A move-evaluation worker of a multi-threaded phase.
    MoveThread,
}

// The score director manages solution state and score calculation.
//
// It is responsible for:
// - Owning the working solution
// - Calculating scores through the score accumulator
// - Cloning solutions into structurally independent copies
// - Forking itself for child solver threads
pub trait ScoreDirector<S: PlanningSolution>: Send {
    // Returns a reference to the working solution.
    fn working_solution(&self) -> &S;

    // Returns a mutable reference to the working solution.
    fn working_solution_mut(&mut self) -> &mut S;

    // Replaces the working solution.
    fn set_working_solution(&mut self, solution: S);

    // Calculates and returns the current score.
    fn calculate_score(&mut self) -> Score<S::Value>;

    // Clones a solution into a structurally independent copy.
    //
    // Mutating the clone must never be observable through the original.
    fn clone_solution(&self, solution: &S) -> S {
        solution.clone()
    }

    // Clones the working solution.
    fn clone_working_solution(&self) -> S {
        self.clone_solution(self.working_solution())
    }

    // Number of score calculations performed by this director.
    //
    // Feeds the solver scope's calculation-speed metric.
    fn calculation_count(&self) -> u64;

    // Forks an independent director for a child solver thread.
    //
    // The child owns its own working solution clone and a fresh
    // accumulator with the same level layout; its calculation count
    // starts at zero.
    fn create_child_thread_score_director(&self, child_thread_type: ChildThreadType) -> Self
    where
        Self: Sized;
}
