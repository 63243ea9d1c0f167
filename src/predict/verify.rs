//! Scalar/packed equivalence checking.
//!
//! The packed representation is worthless if it disagrees with the model
//! it claims to accelerate, so divergence is a fatal integrity failure:
//! the checker panics rather than letting an unverified packed path be
//! used for measurement.

use crate::forest::Forest;
use crate::packed::PackedForest;

use super::depth2::evaluate_pair;

/// Default tolerance for scalar/packed divergence.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Compare every packed record against the scalar oracle.
///
/// For each pair, the scalar sum of both trees' individual evaluations
/// must match the kernel's combined sum within `tolerance`. Run once per
/// data set before the packed path is trusted.
///
/// # Panics
///
/// Panics if the forests have different tree counts, or on the first pair
/// whose packed sum diverges beyond `tolerance`.
pub fn assert_forest_equivalence(
    forest: &Forest,
    packed: &PackedForest,
    features: &[f32],
    tolerance: f64,
) {
    assert_eq!(
        forest.num_trees(),
        packed.num_trees(),
        "scalar and packed forests have different tree counts"
    );

    for (pair_idx, pair) in packed.pairs().enumerate() {
        let scalar_a = forest.tree(2 * pair_idx).evaluate(features) as f64;
        let scalar_b = forest.tree(2 * pair_idx + 1).evaluate(features) as f64;
        let scalar_sum = scalar_a + scalar_b;
        let packed_sum = evaluate_pair(pair, features) as f64;

        let diff = (scalar_sum - packed_sum).abs();
        if diff > tolerance {
            panic!(
                "packed pair {pair_idx} diverges from the scalar oracle: \
                 scalar {scalar_sum} vs packed {packed_sum} (diff {diff} > tolerance {tolerance})"
            );
        }
    }
}
