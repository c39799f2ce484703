//! Score types for representing solution quality
//!
//! A score is an ordered sequence of levels, hard levels before soft
//! levels, plus a special init level counting unassigned entities. Scores
//! are immutable; arithmetic returns new instances. All score flavors
//! (simple, hard/soft, bendable, decimal) are level-layout instantiations
//! of the one generic [`Score`] type.

mod generic;
mod value;

#[cfg(test)]
mod tests;

pub use generic::{Score, ScoreParseError};
pub use value::ScoreValue;

/// Semantic kind of a score level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelKind {
    /// Hard constraints - must be satisfied for feasibility.
    Hard,
    /// Soft constraints - optimization objectives, compared only after
    /// all hard levels are equal.
    Soft,
}

/// Single-level integer score (no hard levels).
///
/// Flavor aliases name a conventional level layout of the one generic
/// [`Score`] type; the layout is runtime data, not a distinct type, so
/// the compiler does not keep flavors apart. Use the matching
/// constructor ([`Score::simple`] here) and [`Score::compare`] surfaces
/// any layout mismatch at runtime.
pub type SimpleScore = Score<i64>;

/// Two-level integer score: one hard level, one soft level.
///
/// A layout alias, not a distinct type; see [`SimpleScore`]. Construct
/// with [`Score::hard_soft`].
pub type HardSoftScore = Score<i64>;

/// Integer score with a runtime-configured number of hard and soft levels.
///
/// A layout alias, not a distinct type; see [`SimpleScore`]. Construct
/// with [`Score::bendable`].
pub type BendableScore = Score<i64>;

/// Single-level exact-decimal score.
///
/// A layout alias, not a distinct type; see [`SimpleScore`].
#[cfg(feature = "decimal")]
pub type SimpleDecimalScore = Score<rust_decimal::Decimal>;

/// Exact-decimal score with runtime-configured hard and soft levels.
///
/// A layout alias, not a distinct type; see [`SimpleScore`].
#[cfg(feature = "decimal")]
pub type BendableDecimalScore = Score<rust_decimal::Decimal>;
