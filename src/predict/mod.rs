//! Branch-free evaluation kernels and the scalar/packed equivalence check.

pub mod depth2;
pub mod stump;
pub mod verify;

pub use depth2::{evaluate_pair, evaluate_pair_with_mask};
pub use stump::{select_simd, select_slow, select_x4, select_x8, LaneWidth};
pub use verify::{assert_forest_equivalence, DEFAULT_TOLERANCE};
