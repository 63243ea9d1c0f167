//! Packed dual-tree record and the repacking transform.

use crate::trees::Tree;

use super::layout::{leaf_slot, LEAVES_PER_TREE, LEFT, RIGHT, ROOT, SPLITS_PER_TREE, TREES_PER_PAIR};

/// One depth-2 tree repacked for lane-parallel consumption.
///
/// `features` and `thresholds` are indexed by the split slots
/// [`ROOT`], [`LEFT`] and [`RIGHT`]; `leaves` is indexed by
/// [`leaf_slot`]. The field order is an implicit contract with the
/// depth-2 kernel, kept honest by sharing the constants in
/// [`super::layout`] between both sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedTree {
    pub(crate) features: [u32; SPLITS_PER_TREE],
    pub(crate) thresholds: [f32; SPLITS_PER_TREE],
    pub(crate) leaves: [f32; LEAVES_PER_TREE],
}

impl PackedTree {
    /// Repack a scalar depth-2 tree.
    ///
    /// This is a pure, order-preserving transform; it is not part of the
    /// evaluation hot path.
    ///
    /// # Panics
    ///
    /// Panics if the tree does not have the fixed depth-2 shape. Shapes
    /// are a precondition of the packed path, not input to validate
    /// gracefully.
    pub fn from_tree(tree: &Tree) -> Self {
        if let Err(err) = tree.validate_depth2() {
            panic!("tree cannot be packed: {err}");
        }

        let root = tree.node(0);
        let left = tree.node(root.left);
        let right = tree.node(root.right);

        let mut features = [0u32; SPLITS_PER_TREE];
        let mut thresholds = [0.0f32; SPLITS_PER_TREE];
        features[ROOT] = root.feature;
        features[LEFT] = left.feature;
        features[RIGHT] = right.feature;
        thresholds[ROOT] = root.value;
        thresholds[LEFT] = left.value;
        thresholds[RIGHT] = right.value;

        let mut leaves = [0.0f32; LEAVES_PER_TREE];
        leaves[leaf_slot(false, false)] = tree.node(left.left).value;
        leaves[leaf_slot(false, true)] = tree.node(left.right).value;
        leaves[leaf_slot(true, false)] = tree.node(right.left).value;
        leaves[leaf_slot(true, true)] = tree.node(right.right).value;

        Self {
            features,
            thresholds,
            leaves,
        }
    }
}

/// Two same-shaped depth-2 trees packed into one record.
///
/// A pair is the unit the 8-lane kernel consumes: four leaf outcomes per
/// tree, one per lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedTreePair {
    pub(crate) trees: [PackedTree; TREES_PER_PAIR],
}

impl PackedTreePair {
    /// Pack two scalar depth-2 trees into one record.
    ///
    /// # Panics
    ///
    /// Panics if either tree does not have the fixed depth-2 shape.
    pub fn pack(a: &Tree, b: &Tree) -> Self {
        Self {
            trees: [PackedTree::from_tree(a), PackedTree::from_tree(b)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trees::Node;

    fn depth2_tree(base: f32) -> Tree {
        Tree::from_nodes(vec![
            Node::split(1, 2, 0, 0.5),
            Node::split(3, 4, 1, 0.3),
            Node::split(5, 6, 2, -0.1),
            Node::leaf(base + 1.0),
            Node::leaf(base + 2.0),
            Node::leaf(base + 3.0),
            Node::leaf(base + 4.0),
        ])
    }

    #[test]
    fn pack_preserves_splits_and_leaves() {
        let packed = PackedTree::from_tree(&depth2_tree(0.0));

        assert_eq!(packed.features, [0, 1, 2]);
        assert_eq!(packed.thresholds, [0.5, 0.3, -0.1]);
        assert_eq!(packed.leaves, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn pack_pair_keeps_tree_order() {
        let pair = PackedTreePair::pack(&depth2_tree(0.0), &depth2_tree(10.0));
        assert_eq!(pair.trees[0].leaves, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(pair.trees[1].leaves, [11.0, 12.0, 13.0, 14.0]);
    }

    #[test]
    #[should_panic(expected = "cannot be packed")]
    fn pack_rejects_stump() {
        let stump = Tree::from_nodes(vec![
            Node::split(1, 2, 0, 0.0),
            Node::leaf(-1.0),
            Node::leaf(1.0),
        ]);
        PackedTree::from_tree(&stump);
    }
}
