//! Error types for the score accumulator.

use thiserror::Error;

use crate::holder::MatchContext;

/// Contract violations between the constraint-evaluation layer and the
/// score holder.
///
/// These indicate that the evaluation layer and the declared score layout
/// have diverged; they must fail fast rather than be swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HolderError {
    /// A level index outside the configured level count.
    #[error("score level index {index} out of range for {level_count} levels")]
    LevelIndexOutOfRange { index: usize, level_count: usize },

    /// A second constraint match was registered for a context whose first
    /// match has not been retracted.
    #[error("evaluation context {context:?} already has a registered undo action")]
    DoubleRegistration { context: MatchContext },

    /// An undo for a context with no live registration (including a
    /// second undo for the same match).
    #[error("evaluation context {context:?} has no registered undo action")]
    UnknownContext { context: MatchContext },

    /// An integer level magnitude overflowed instead of silently wrapping.
    #[error("arithmetic overflow at score level {level_index}")]
    ArithmeticOverflow { level_index: usize },
}
