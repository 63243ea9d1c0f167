//! Packed forest derived from a scalar forest.

use rayon::prelude::*;

use crate::forest::Forest;
use crate::predict::depth2::evaluate_pair;

use super::pair::PackedTreePair;

/// A forest repacked into dual-tree records for the SIMD path.
///
/// Derived from a [`Forest`] by an order-preserving transform: record `i`
/// holds trees `2i` and `2i + 1`. The packed forest owns its records and
/// can always be regenerated from the scalar trees.
#[derive(Debug, Clone)]
pub struct PackedForest {
    pairs: Vec<PackedTreePair>,
    num_trees: usize,
}

impl PackedForest {
    /// Repack a scalar forest for dual-tree SIMD evaluation.
    ///
    /// # Panics
    ///
    /// Panics if the forest has an odd tree count (the dual-tree kernel
    /// has no single-tree fallback by design) or if any tree does not have
    /// the fixed depth-2 shape.
    pub fn from_forest(forest: &Forest) -> Self {
        let num_trees = forest.num_trees();
        assert!(
            num_trees % 2 == 0,
            "packed evaluation requires an even tree count, got {num_trees}"
        );

        let pairs = (0..num_trees / 2)
            .map(|i| PackedTreePair::pack(forest.tree(2 * i), forest.tree(2 * i + 1)))
            .collect();

        Self { pairs, num_trees }
    }

    /// Number of packed dual-tree records.
    #[inline]
    pub fn num_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Number of trees represented by this forest.
    #[inline]
    pub fn num_trees(&self) -> usize {
        self.num_trees
    }

    /// Get a record by index.
    #[inline]
    pub fn pair(&self, idx: usize) -> &PackedTreePair {
        &self.pairs[idx]
    }

    /// Iterate over the records in order.
    pub fn pairs(&self) -> impl Iterator<Item = &PackedTreePair> {
        self.pairs.iter()
    }

    /// Evaluate the ensemble through the branch-free kernel: each record
    /// contributes the sum of its two trees' leaf values, accumulated in
    /// f64 and divided by the total tree count.
    ///
    /// # Panics
    ///
    /// Panics if the forest is empty.
    pub fn evaluate(&self, features: &[f32]) -> f64 {
        assert!(!self.pairs.is_empty(), "cannot evaluate an empty forest");
        let total: f64 = self
            .pairs
            .iter()
            .map(|pair| evaluate_pair(pair, features) as f64)
            .sum();
        total / self.num_trees as f64
    }

    /// Like [`evaluate`](PackedForest::evaluate), but shards the record
    /// array across the rayon pool. Each shard keeps an independent f64
    /// accumulator; shard totals are summed at the end, so the result can
    /// differ from the sequential sum only by floating-point reassociation.
    pub fn evaluate_parallel(&self, features: &[f32]) -> f64 {
        assert!(!self.pairs.is_empty(), "cannot evaluate an empty forest");
        let total: f64 = self
            .pairs
            .par_iter()
            .map(|pair| evaluate_pair(pair, features) as f64)
            .sum();
        total / self.num_trees as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trees::{Node, Tree};

    fn depth2_tree(leaves: [f32; 4]) -> Tree {
        Tree::from_nodes(vec![
            Node::split(1, 2, 0, 0.0),
            Node::split(3, 4, 1, 0.0),
            Node::split(5, 6, 2, 0.0),
            Node::leaf(leaves[0]),
            Node::leaf(leaves[1]),
            Node::leaf(leaves[2]),
            Node::leaf(leaves[3]),
        ])
    }

    fn four_tree_forest() -> Forest {
        Forest::from_trees(vec![
            depth2_tree([1.0, 2.0, 3.0, 4.0]),
            depth2_tree([10.0, 20.0, 30.0, 40.0]),
            depth2_tree([-1.0, -2.0, -3.0, -4.0]),
            depth2_tree([0.5, 1.5, 2.5, 3.5]),
        ])
    }

    #[test]
    fn from_forest_pairs_in_order() {
        let packed = PackedForest::from_forest(&four_tree_forest());
        assert_eq!(packed.num_pairs(), 2);
        assert_eq!(packed.num_trees(), 4);
        assert_eq!(packed.pair(0).trees[1].leaves, [10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn evaluate_matches_scalar_mean() {
        let forest = four_tree_forest();
        let packed = PackedForest::from_forest(&forest);

        // All features negative: every tree lands in its left-left leaf.
        let features = [-1.0, -1.0, -1.0];
        let expected = (1.0 + 10.0 - 1.0 + 0.5) / 4.0;
        assert_eq!(packed.evaluate(&features), expected);
        assert_eq!(packed.evaluate_parallel(&features), expected);
        assert_eq!(forest.evaluate(&features), expected);
    }

    #[test]
    #[should_panic(expected = "even tree count")]
    fn from_forest_rejects_odd_count() {
        let forest = Forest::from_trees(vec![depth2_tree([0.0; 4])]);
        PackedForest::from_forest(&forest);
    }
}
