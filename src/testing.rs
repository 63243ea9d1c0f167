//! Testing utilities: approximate assertions and seeded generators.
//!
//! The generators produce deterministic random forests and feature vectors
//! for equivalence tests and benchmarks. Values are drawn uniformly from
//! [-0.1, 0.1), matching the regime the kernels are exercised in.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::forest::Forest;
use crate::trees::{Node, Tree};

/// Range the generators draw thresholds, leaves and features from.
const VALUE_RANGE: std::ops::Range<f32> = -0.1..0.1;

/// Assert that two f32 values are approximately equal.
///
/// Uses absolute difference comparison with the given tolerance.
///
/// # Examples
///
/// ```
/// # use shallow_forest::assert_approx_eq;
/// assert_approx_eq!(1.0f32, 1.0001f32, 0.001);
/// ```
///
/// # Panics
///
/// Panics if the absolute difference exceeds tolerance.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val = $left;
        let right_val = $right;
        let tol = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
}

/// Assert that two f64 values are approximately equal.
///
/// # Examples
///
/// ```
/// # use shallow_forest::assert_approx_eq_f64;
/// assert_approx_eq_f64!(1.0f64, 1.0001f64, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq_f64 {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
}

/// Generate a forest of random fixed-shape depth-2 trees.
///
/// Split features are drawn uniformly from `0..num_features`; thresholds
/// and leaf values from [-0.1, 0.1). Deterministic for a given seed.
pub fn random_depth2_forest(num_trees: usize, num_features: usize, seed: u64) -> Forest {
    assert!(num_features > 0, "need at least one feature");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    let mut forest = Forest::new();
    for _ in 0..num_trees {
        let mut nodes = Vec::with_capacity(7);
        for (left, right) in [(1u32, 2u32), (3, 4), (5, 6)] {
            nodes.push(Node::split(
                left,
                right,
                rng.gen_range(0..num_features) as u32,
                rng.gen_range(VALUE_RANGE),
            ));
        }
        for _ in 0..4 {
            nodes.push(Node::leaf(rng.gen_range(VALUE_RANGE)));
        }
        forest.push_tree(Tree::from_nodes(nodes));
    }
    forest
}

/// Generate a random feature vector. Deterministic for a given seed.
pub fn random_features(num_features: usize, seed: u64) -> Vec<f32> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..num_features)
        .map(|_| rng.gen_range(VALUE_RANGE))
        .collect()
}

/// Generate the four parallel input arrays of a random stump batch.
///
/// Returns `(a, b, x, y)`, each of length `count`.
pub fn random_stump_inputs(count: usize, seed: u64) -> (Vec<f32>, Vec<f32>, Vec<f32>, Vec<f32>) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut array = || -> Vec<f32> { (0..count).map(|_| rng.gen_range(VALUE_RANGE)).collect() };
    (array(), array(), array(), array())
}
