//! Flat scalar tree storage and the branching traversal oracle.

use super::node::Node;

/// Node count of the fixed depth-2 shape: root, two children, four leaves.
pub const DEPTH2_NODE_COUNT: usize = 7;

/// Structural validation errors for [`Tree`].
///
/// Validation is intended for construction-time and debug checks; the
/// evaluation hot path assumes a valid tree and does not re-check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    #[error("tree has no nodes")]
    EmptyTree,
    /// A child pointer references an out-of-bounds node.
    #[error("node {node}: {side} child {child} out of bounds (tree has {n_nodes} nodes)")]
    ChildOutOfBounds {
        node: u32,
        side: &'static str,
        child: u32,
        n_nodes: usize,
    },
    /// A node references itself as a child.
    #[error("node {node} references itself as a child")]
    SelfReference { node: u32 },
    /// A split node references the root as one child. Index 0 doubles as
    /// the no-child sentinel, so such a node would be misread downstream.
    #[error("node {node}: {side} child references the root (index 0 is the no-child sentinel)")]
    RootChild { node: u32, side: &'static str },
    /// Node count does not match the fixed depth-2 shape.
    #[error("expected the fixed depth-2 shape of {DEPTH2_NODE_COUNT} nodes, got {n_nodes}")]
    NotDepth2 { n_nodes: usize },
    /// An internal position of the depth-2 shape holds a terminal node.
    #[error("node {node} must be a split node in the depth-2 shape")]
    UnexpectedLeaf { node: u32 },
    /// A leaf position of the depth-2 shape holds a split node.
    #[error("node {node} must be a terminal node in the depth-2 shape")]
    UnexpectedSplit { node: u32 },
    /// Children of a depth-2 split are not wired in breadth-first order.
    #[error("node {node}: children are not in breadth-first order")]
    ChildLayout { node: u32 },
}

/// A decision tree stored as a flat node array, index 0 is the root.
///
/// Immutable after construction and exclusively owned by the forest it
/// belongs to. Feature indices referenced by split nodes must be valid for
/// every feature vector the tree is evaluated against; this is a caller
/// obligation that [`evaluate`](Tree::evaluate) only checks in debug builds.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Box<[Node]>,
}

impl Tree {
    /// Create a tree from a node list.
    ///
    /// # Panics
    ///
    /// Panics if `nodes` is empty. Deeper structural checks are available
    /// through [`validate`](Tree::validate) and
    /// [`validate_depth2`](Tree::validate_depth2).
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        assert!(!nodes.is_empty(), "a tree needs at least a root node");
        Self {
            nodes: nodes.into_boxed_slice(),
        }
    }

    /// Number of nodes in this tree.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Get a node by index.
    #[inline]
    pub fn node(&self, idx: u32) -> &Node {
        &self.nodes[idx as usize]
    }

    /// Evaluate the tree against a feature vector by branching traversal.
    ///
    /// Starting at the root: terminal nodes return their leaf value,
    /// split nodes compare `features[feature] <= threshold` and move to the
    /// left child on true, the right child otherwise. A NaN feature value
    /// compares false and therefore takes the right branch.
    ///
    /// This is the equivalence oracle for the packed SIMD path; it runs in
    /// O(depth) with one data-dependent branch per level.
    #[inline]
    pub fn evaluate(&self, features: &[f32]) -> f32 {
        let mut idx = 0u32;
        loop {
            let node = &self.nodes[idx as usize];
            if node.is_terminal() {
                return node.value;
            }
            debug_assert!(
                (node.feature as usize) < features.len(),
                "split feature {} out of range for {} features",
                node.feature,
                features.len()
            );
            let fvalue = features[node.feature as usize];
            idx = if fvalue <= node.value {
                node.left
            } else {
                node.right
            };
        }
    }

    /// Validate basic structural invariants.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.num_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            let idx = idx as u32;
            if node.is_terminal() {
                continue;
            }
            for (side, child) in [("left", node.left), ("right", node.right)] {
                if child == idx {
                    return Err(TreeValidationError::SelfReference { node: idx });
                }
                if child == 0 {
                    return Err(TreeValidationError::RootChild { node: idx, side });
                }
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node: idx,
                        side,
                        child,
                        n_nodes,
                    });
                }
            }
        }

        Ok(())
    }

    /// Validate that this tree has the exact fixed depth-2 shape expected
    /// by the packed representation: node 0 splitting into nodes 1 and 2,
    /// which split into terminal nodes 3/4 and 5/6.
    pub fn validate_depth2(&self) -> Result<(), TreeValidationError> {
        if self.num_nodes() != DEPTH2_NODE_COUNT {
            return Err(TreeValidationError::NotDepth2 {
                n_nodes: self.num_nodes(),
            });
        }

        for (idx, left, right) in [(0u32, 1u32, 2u32), (1, 3, 4), (2, 5, 6)] {
            let node = self.node(idx);
            if node.is_terminal() {
                return Err(TreeValidationError::UnexpectedLeaf { node: idx });
            }
            if node.left != left || node.right != right {
                return Err(TreeValidationError::ChildLayout { node: idx });
            }
        }
        for idx in 3..DEPTH2_NODE_COUNT as u32 {
            if !self.node(idx).is_terminal() {
                return Err(TreeValidationError::UnexpectedSplit { node: idx });
            }
        }

        Ok(())
    }
}
