//! Score directors: working-solution ownership and score calculation.

mod holder_director;
mod traits;


pub use holder_director::HolderScoreDirector;
pub use traits::{ChildThreadType, ScoreDirector};
