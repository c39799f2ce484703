//! Per-run solver state.

mod solver;

pub use solver::{BestSnapshot, SolverScope};

#[cfg(test)]
mod tests;
