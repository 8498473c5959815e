//! Control-flow counting and node complexity.

pub mod branching;
pub mod engine;

pub use branching::{count_branch_points, max_brace_depth};
pub use engine::{ComplexityEngine, MAX_COMPLEXITY};
