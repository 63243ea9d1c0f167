//! Flat tree node type.

/// One node of a flat scalar tree.
///
/// Nodes live in a flat array with index 0 as the root. Index 0 doubles as
/// the "no child" sentinel: a node is terminal iff both child indices are 0.
/// For a terminal node `value` holds the leaf value; for a split node it
/// holds the split threshold (go left if `feature_value <= value`).
///
/// Because 0 is both the root and the sentinel, a non-root split node can
/// never legitimately reference the root as a child. The fixed-shape
/// builders in this crate never produce such a reference, but the rule is
/// fragile if tree depth is ever generalized; see
/// [`TreeValidationError::RootChild`](super::TreeValidationError::RootChild).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Left child index (0 = none).
    pub left: u32,
    /// Right child index (0 = none).
    pub right: u32,
    /// Split feature index (unused for terminal nodes).
    pub feature: u32,
    /// Split threshold, or the leaf value for terminal nodes.
    pub value: f32,
}

impl Node {
    /// Create a split node.
    pub fn split(left: u32, right: u32, feature: u32, threshold: f32) -> Self {
        Self {
            left,
            right,
            feature,
            value: threshold,
        }
    }

    /// Create a terminal node carrying a leaf value.
    pub fn leaf(value: f32) -> Self {
        Self {
            left: 0,
            right: 0,
            feature: 0,
            value,
        }
    }

    /// A node is terminal iff both children are the no-child sentinel.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.left == 0 && self.right == 0
    }
}
