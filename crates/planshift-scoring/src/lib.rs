//! PlanShift Scoring - Incremental score accounting
//!
//! This crate provides:
//! - [`ScoreHolder`]: the mutable accumulator that constraint evaluation
//!   writes into, with the add/undo protocol that keeps recalculation
//!   proportional to the number of *changed* matches
//! - [`ScoreDirector`]: the contract between the solver and the working
//!   solution's score calculation
//! - [`HolderScoreDirector`]: a holder-backed director implementation

pub mod director;
pub mod error;
pub mod holder;

pub use director::{ChildThreadType, HolderScoreDirector, ScoreDirector};
pub use error::HolderError;
pub use holder::{ConstraintMatch, ConstraintMatchTotal, MatchContext, ScoreHolder};
