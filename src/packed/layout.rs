//! Lane layout shared by the packing transform and the depth-2 kernel.
//!
//! The packed record's field order and the order in which the kernel
//! assembles its comparison vectors must agree exactly; a mismatch would
//! silently produce wrong sums rather than a detectable error. Both sides
//! therefore read this one table and never spell out lane positions
//! themselves.
//!
//! A lane carries one of the four possible outcomes of one tree of the
//! pair: both the root condition and the second-level condition for that
//! outcome are evaluated speculatively in every lane, and their conjunction
//! is true in exactly one lane per tree half.

/// Number of SIMD lanes used by the depth-2 kernel.
pub const LANES: usize = 8;

/// Trees packed per record.
pub const TREES_PER_PAIR: usize = 2;

/// Leaf slots per depth-2 tree.
pub const LEAVES_PER_TREE: usize = 4;

/// Split slots per depth-2 tree, indexed by [`ROOT`], [`LEFT`] and [`RIGHT`].
pub const SPLITS_PER_TREE: usize = 3;

/// Split slot of the root node.
pub const ROOT: usize = 0;
/// Split slot of the root's left child.
pub const LEFT: usize = 1;
/// Split slot of the root's right child.
pub const RIGHT: usize = 2;

/// What one kernel lane carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneSpec {
    /// Which tree of the pair this lane belongs to.
    pub tree: usize,
    /// Leaf slot within the tree, see [`leaf_slot`].
    pub leaf: usize,
    /// This leaf sits under the root's right branch.
    pub root_right: bool,
    /// This leaf is the right child of its level-1 parent.
    pub level2_right: bool,
}

/// Leaf slot for a root-level and second-level branch direction.
///
/// Leaves are ordered left-left, left-right, right-left, right-right.
#[inline]
pub const fn leaf_slot(root_right: bool, level2_right: bool) -> usize {
    (root_right as usize) * 2 + level2_right as usize
}

/// Lane `i` carries leaf `i % 4` of tree `i / 4`.
pub const LANE_TABLE: [LaneSpec; LANES] = [
    LaneSpec { tree: 0, leaf: 0, root_right: false, level2_right: false },
    LaneSpec { tree: 0, leaf: 1, root_right: false, level2_right: true },
    LaneSpec { tree: 0, leaf: 2, root_right: true, level2_right: false },
    LaneSpec { tree: 0, leaf: 3, root_right: true, level2_right: true },
    LaneSpec { tree: 1, leaf: 0, root_right: false, level2_right: false },
    LaneSpec { tree: 1, leaf: 1, root_right: false, level2_right: true },
    LaneSpec { tree: 1, leaf: 2, root_right: true, level2_right: false },
    LaneSpec { tree: 1, leaf: 3, root_right: true, level2_right: true },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_table_is_consistent() {
        for (lane, spec) in LANE_TABLE.iter().enumerate() {
            assert_eq!(spec.tree, lane / LEAVES_PER_TREE);
            assert_eq!(spec.leaf, lane % LEAVES_PER_TREE);
            assert_eq!(spec.leaf, leaf_slot(spec.root_right, spec.level2_right));
        }
    }

    #[test]
    fn lane_table_covers_every_outcome_once() {
        let mut seen = [[false; LEAVES_PER_TREE]; TREES_PER_PAIR];
        for spec in LANE_TABLE {
            assert!(!seen[spec.tree][spec.leaf], "duplicate lane assignment");
            seen[spec.tree][spec.leaf] = true;
        }
        assert!(seen.iter().flatten().all(|&s| s));
    }
}
