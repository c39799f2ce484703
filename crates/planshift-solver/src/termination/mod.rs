//! Termination collaborators polled between solver iterations.

mod external;
mod time;

pub use external::ExternalTermination;
pub use time::TimeTermination;

use std::fmt::Debug;

use planshift_core::PlanningSolution;
use planshift_scoring::ScoreDirector;

use crate::scope::SolverScope;

/// Decides when a solver run should stop.
///
/// Checked cooperatively between iterations, right after
/// [`SolverScope::check_yielding`], so a stop requested while the thread
/// was parked is observed without extra latency.
pub trait Termination<S: PlanningSolution, D: ScoreDirector<S>>: Send + Debug {
    fn is_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool;
}
