//! PlanShift Solver - Run scope and concurrency model
//!
//! This crate provides the per-run mutable state shared by all search
//! phases:
//! - [`SolverScope`]: best-solution tracking, timing, calculation-speed
//!   metrics, reproducible randomness, child-thread forking
//! - [`SolverThreadThrottle`]: cooperative CPU yielding so solver threads
//!   respect a concurrency cap
//! - [`Termination`] collaborators polled between iterations

pub mod error;
pub mod scope;
pub mod termination;
pub mod yielding;

pub use error::ScopeError;
pub use scope::{BestSnapshot, SolverScope};
pub use termination::{ExternalTermination, Termination, TimeTermination};
pub use yielding::{SolverThreadThrottle, YieldOutcome};
