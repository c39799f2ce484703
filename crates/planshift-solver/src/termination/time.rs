use std::time::Duration;

use planshift_core::PlanningSolution;
use planshift_scoring::ScoreDirector;

use crate::scope::SolverScope;

use super::Termination;

/// Terminates once the run has spent a fixed wall-clock budget.
#[derive(Debug, Clone, Copy)]
pub struct TimeTermination {
    spent_limit: Duration,
}

impl TimeTermination {
    pub fn new(spent_limit: Duration) -> Self {
        TimeTermination { spent_limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn spent_limit(&self) -> Duration {
        self.spent_limit
    }
}

impl<S, D> Termination<S, D> for TimeTermination
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    // A scope that has not started yet cannot have spent its budget.
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope
            .calculate_time_spent_up_to_now()
            .is_ok_and(|spent| spent >= self.spent_limit)
    }
}
