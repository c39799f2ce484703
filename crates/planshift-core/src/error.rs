//! Error types for PlanShift score operations

use thiserror::Error;

/// Errors raised by score arithmetic and level access.
///
/// Layout and index errors indicate that the caller and the declared score
/// definition have diverged; they are programmer errors and must not be
/// swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Two scores with different level layouts were combined.
    #[error(
        "incompatible score layouts: {expected_hard}hard/{expected_soft}soft \
         vs {actual_hard}hard/{actual_soft}soft"
    )]
    IncompatibleLayout {
        expected_hard: usize,
        expected_soft: usize,
        actual_hard: usize,
        actual_soft: usize,
    },

    /// An integer score level overflowed instead of silently wrapping.
    #[error("arithmetic overflow at score level {level}")]
    ArithmeticOverflow { level: String },

    /// A level index outside the configured level count.
    #[error("score level index {index} out of range for {level_count} levels")]
    LevelIndexOutOfRange { index: usize, level_count: usize },
}

/// Result type alias for score operations
pub type Result<T> = std::result::Result<T, ScoreError>;
