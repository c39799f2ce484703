use planshift_core::PlanningSolution;
use planshift_scoring::ScoreDirector;

use crate::scope::SolverScope;

use super::Termination;

/// Terminates when the scope has been marked for early termination, either
/// through [`SolverScope::terminate_early`] or by an interrupted yield
/// wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalTermination;

impl ExternalTermination {
    pub fn new() -> Self {
        ExternalTermination
    }
}

impl<S, D> Termination<S, D> for ExternalTermination
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.is_terminate_early()
    }
}
