//! PlanShift Core - Core types for constraint-based optimization
//!
//! This crate provides the fundamental abstractions for PlanShift:
//! - A generic multi-level score type for representing solution quality
//! - Numeric level kinds (integer, float, exact decimal)
//! - Constraint identity types for match bookkeeping
//! - The planning solution contract

pub mod constraint;
pub mod domain;
pub mod error;
pub mod score;

pub use constraint::{ConstraintRef, ImpactType};
pub use domain::PlanningSolution;
pub use error::{Result, ScoreError};
pub use score::{LevelKind, Score, ScoreParseError, ScoreValue};
