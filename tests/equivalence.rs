//! Equivalence laws between the scalar oracle and the packed SIMD path.
//!
//! These tests exercise whole-forest behavior; the pinned single-record
//! scenarios live next to the kernels as unit tests.

use approx::assert_abs_diff_eq;
use rstest::rstest;

use shallow_forest::forest::Forest;
use shallow_forest::packed::PackedForest;
use shallow_forest::predict::{
    assert_forest_equivalence, evaluate_pair_with_mask, select_simd, select_slow, LaneWidth,
    DEFAULT_TOLERANCE,
};
use shallow_forest::testing::{random_depth2_forest, random_features, random_stump_inputs};
use shallow_forest::trees::{Node, Tree};

// =============================================================================
// Depth-2 forest equivalence
// =============================================================================

#[rstest]
#[case(2, 4, 1)]
#[case(16, 8, 2)]
#[case(100, 32, 3)]
#[case(1_000, 256, 4)]
fn packed_forest_matches_scalar(
    #[case] num_trees: usize,
    #[case] num_features: usize,
    #[case] seed: u64,
) {
    let forest = random_depth2_forest(num_trees, num_features, seed);
    let packed = PackedForest::from_forest(&forest);
    let features = random_features(num_features, seed.wrapping_mul(31) + 1);

    // Per-pair check first: any divergence is fatal here.
    assert_forest_equivalence(&forest, &packed, &features, DEFAULT_TOLERANCE);

    let scalar = forest.evaluate(&features);
    assert_abs_diff_eq!(packed.evaluate(&features), scalar, epsilon = 1e-6);
    assert_abs_diff_eq!(packed.evaluate_parallel(&features), scalar, epsilon = 1e-6);
}

#[test]
fn packed_forest_matches_scalar_across_feature_vectors() {
    let forest = random_depth2_forest(64, 16, 99);
    let packed = PackedForest::from_forest(&forest);

    for feature_seed in 0..20 {
        let features = random_features(16, feature_seed);
        assert_forest_equivalence(&forest, &packed, &features, DEFAULT_TOLERANCE);
    }
}

#[test]
fn mask_exclusivity_over_random_forests() {
    let forest = random_depth2_forest(200, 16, 21);
    let packed = PackedForest::from_forest(&forest);
    let features = random_features(16, 22);

    for pair_idx in 0..packed.num_pairs() {
        let (_, bits) = evaluate_pair_with_mask(packed.pair(pair_idx), &features);
        assert_eq!(
            (bits & 0x0f).count_ones(),
            1,
            "pair {pair_idx}: lower half selected {bits:#010b}"
        );
        assert_eq!(
            (bits >> 4).count_ones(),
            1,
            "pair {pair_idx}: upper half selected {bits:#010b}"
        );
    }
}

#[test]
fn boundary_feature_equal_to_threshold_goes_left_in_both_paths() {
    // Root and second-level thresholds both hit exactly.
    let tree = Tree::from_nodes(vec![
        Node::split(1, 2, 0, 0.25),
        Node::split(3, 4, 1, -0.5),
        Node::split(5, 6, 1, 0.75),
        Node::leaf(1.0),
        Node::leaf(2.0),
        Node::leaf(3.0),
        Node::leaf(4.0),
    ]);
    let forest = Forest::from_trees(vec![tree.clone(), tree]);
    let packed = PackedForest::from_forest(&forest);

    let features = [0.25, -0.5];
    assert_eq!(forest.tree(0).evaluate(&features), 1.0);
    assert_eq!(forest.evaluate(&features), 1.0);
    assert_eq!(packed.evaluate(&features), 1.0);
    assert_forest_equivalence(&forest, &packed, &features, DEFAULT_TOLERANCE);
}

// =============================================================================
// Stump equivalence
// =============================================================================

#[rstest]
#[case(LaneWidth::X4, 8, 1)]
#[case(LaneWidth::X4, 4_000, 2)]
#[case(LaneWidth::X8, 8, 3)]
#[case(LaneWidth::X8, 4_000, 4)]
fn stump_simd_matches_slow(#[case] width: LaneWidth, #[case] count: usize, #[case] seed: u64) {
    let (a, b, x, y) = random_stump_inputs(count, seed);
    let slow = select_slow(&a, &b, &x, &y);
    let fast = select_simd(&a, &b, &x, &y, width);
    assert_abs_diff_eq!(fast, slow, epsilon = 1e-5);
}

#[test]
fn stump_widths_agree_with_each_other() {
    let (a, b, x, y) = random_stump_inputs(1_024, 77);
    let x4 = select_simd(&a, &b, &x, &y, LaneWidth::X4);
    let x8 = select_simd(&a, &b, &x, &y, LaneWidth::X8);
    assert_abs_diff_eq!(x4, x8, epsilon = 1e-5);
}
