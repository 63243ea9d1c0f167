//! Owned scalar forest aggregate.
//!
//! Forests are plain owned collections constructed by the caller and passed
//! by reference through evaluation calls; there is no ambient global state.

use crate::trees::Tree;

/// An ordered ensemble of scalar trees.
///
/// The forest exclusively owns its trees; evaluation treats them as
/// read-only. Tree order is significant for pairing: when the forest is
/// repacked for the SIMD path, trees `2i` and `2i + 1` are evaluated
/// together.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    trees: Vec<Tree>,
}

impl Forest {
    /// Create an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forest from an ordered tree list.
    pub fn from_trees(trees: Vec<Tree>) -> Self {
        Self { trees }
    }

    /// Append a tree to the forest.
    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Number of trees in the forest.
    #[inline]
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Get a tree by index.
    #[inline]
    pub fn tree(&self, idx: usize) -> &Tree {
        &self.trees[idx]
    }

    /// Iterate over the trees in order.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Evaluate the ensemble by branching traversal: the mean of every
    /// tree's leaf value for the given features, accumulated in f64.
    ///
    /// This is the scalar oracle the packed SIMD path is verified against.
    ///
    /// # Panics
    ///
    /// Panics if the forest is empty.
    pub fn evaluate(&self, features: &[f32]) -> f64 {
        assert!(!self.trees.is_empty(), "cannot evaluate an empty forest");
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| tree.evaluate(features) as f64)
            .sum();
        total / self.trees.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trees::Node;

    fn stump(threshold: f32, left_val: f32, right_val: f32) -> Tree {
        Tree::from_nodes(vec![
            Node::split(1, 2, 0, threshold),
            Node::leaf(left_val),
            Node::leaf(right_val),
        ])
    }

    #[test]
    fn evaluate_averages_over_trees() {
        let forest = Forest::from_trees(vec![stump(0.0, 1.0, 2.0), stump(0.0, 3.0, 5.0)]);

        // Both go left: (1 + 3) / 2
        assert_eq!(forest.evaluate(&[-1.0]), 2.0);
        // Both go right: (2 + 5) / 2
        assert_eq!(forest.evaluate(&[1.0]), 3.5);
    }

    #[test]
    fn push_tree_extends_forest() {
        let mut forest = Forest::new();
        assert_eq!(forest.num_trees(), 0);
        forest.push_tree(stump(0.0, -1.0, 1.0));
        assert_eq!(forest.num_trees(), 1);
        assert_eq!(forest.tree(0).num_nodes(), 3);
    }

    #[test]
    #[should_panic(expected = "empty forest")]
    fn evaluate_empty_forest_panics() {
        Forest::new().evaluate(&[0.0]);
    }
}
