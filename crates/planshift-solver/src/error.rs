//! Error types for solver scope operations

use thiserror::Error;

/// Invalid-state errors for [`SolverScope`](crate::scope::SolverScope)
/// queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// A timing query before `starting_now`.
    #[error("solver scope has not started yet")]
    NotStarted,

    /// A total-duration query before `ending_now`.
    #[error("solver scope has not ended yet")]
    NotEnded,

    /// No best solution has been recorded yet.
    #[error("no best solution has been recorded yet")]
    NoBestSolution,
}
