//! PlanShift - A metaheuristic optimization engine core in Rust
//!
//! # Example
//!
//! ```rust
//! use planshift::prelude::*;
//!
//! // Score types are re-exported
//! let score = HardSoftScore::hard_soft(0, -100);
//! assert!(score.is_feasible());
//! assert_eq!(score.to_string(), "0hard/-100soft");
//! ```

// Score types
pub use planshift_core::score::{
    HardSoftScore, LevelKind, Score, ScoreValue, SimpleScore,
};
#[cfg(feature = "decimal")]
pub use planshift_core::score::{BendableDecimalScore, SimpleDecimalScore};
pub use planshift_core::score::BendableScore;

// Domain and constraint vocabulary
pub use planshift_core::{ConstraintRef, ImpactType, PlanningSolution, ScoreError};

// Incremental score accounting
pub use planshift_scoring::{
    ChildThreadType, ConstraintMatch, ConstraintMatchTotal, HolderError, HolderScoreDirector,
    MatchContext, ScoreDirector, ScoreHolder,
};

// Run scope and concurrency model
pub use planshift_solver::{
    BestSnapshot, ExternalTermination, ScopeError, SolverScope, SolverThreadThrottle,
    Termination, TimeTermination, YieldOutcome,
};

pub mod prelude {
    pub use super::{BendableScore, HardSoftScore, Score, ScoreValue, SimpleScore};
    #[cfg(feature = "decimal")]
    pub use super::{BendableDecimalScore, SimpleDecimalScore};
    pub use super::{ConstraintRef, ImpactType, PlanningSolution};
    pub use super::{MatchContext, ScoreDirector, ScoreHolder};
    pub use super::{SolverScope, Termination};
}
