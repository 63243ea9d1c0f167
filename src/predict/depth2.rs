//! 8-lane kernel for packed dual-tree records.
//!
//! A depth-2 tree has four possible outcomes, and reaching one requires
//! the root condition and one second-level condition to hold together. The
//! kernel gives each outcome its own lane and evaluates both conditions in
//! every lane speculatively, the way shut-off branches are handled in
//! data-parallel execution models:
//!
//! 1. Root comparison: each lane compares the lane's root feature value
//!    against the root threshold with `<=`; lanes whose outcome sits under
//!    the root's *right* branch then take the logical complement.
//! 2. Second-level comparison: each lane compares the feature/threshold of
//!    whichever level-1 node its outcome hangs off, complemented for
//!    right-side leaves the same way.
//! 3. The bitwise AND of the two masks is true in exactly one lane per
//!    4-lane tree half; blending the leaf vector against zero and reducing
//!    horizontally yields `leaf(tree A) + leaf(tree B)`.
//!
//! Complementing via XOR with an all-ones lane pattern (rather than
//! re-comparing with swapped operands) keeps the right-branch mask the
//! exact negation of the `<=` predicate, so a feature equal to a threshold
//! or a NaN resolves identically to the scalar traversal.
//!
//! Which lane carries which outcome, and the complement patterns, all
//! derive from [`LANE_TABLE`]; the packing transform reads the same table,
//! so record layout and vector assembly cannot drift apart.

use wide::{f32x8, CmpLe};

use crate::packed::layout::{LaneSpec, LANE_TABLE, LANES, LEFT, RIGHT, ROOT};
use crate::packed::PackedTreePair;

/// Evaluate one packed record: the sum of both trees' selected leaf
/// values for the given features. Callers divide by the tree count at the
/// ensemble level.
///
/// Feature indices must be in range for `features`; this is a caller
/// obligation checked only in debug builds.
#[inline]
pub fn evaluate_pair(pair: &PackedTreePair, features: &[f32]) -> f32 {
    let (sum, _) = evaluate_pair_lanes(pair, features);
    sum
}

/// Instrumented variant of [`evaluate_pair`] that also returns the
/// combined lane mask as a bitset (bit `i` set iff lane `i` is live).
///
/// Exactly one bit per 4-lane half is set for any record and any feature
/// vector; this is the structural invariant the layout guarantees, exposed
/// so tests can assert it.
pub fn evaluate_pair_with_mask(pair: &PackedTreePair, features: &[f32]) -> (f32, u8) {
    evaluate_pair_lanes(pair, features)
}

#[inline]
fn evaluate_pair_lanes(pair: &PackedTreePair, features: &[f32]) -> (f32, u8) {
    let mut root_values = [0.0f32; LANES];
    let mut root_thresholds = [0.0f32; LANES];
    let mut level2_values = [0.0f32; LANES];
    let mut level2_thresholds = [0.0f32; LANES];
    let mut leaves = [0.0f32; LANES];

    for (lane, spec) in LANE_TABLE.iter().enumerate() {
        let tree = &pair.trees[spec.tree];

        debug_assert!(
            (tree.features[ROOT] as usize) < features.len()
                && (tree.features[LEFT] as usize) < features.len()
                && (tree.features[RIGHT] as usize) < features.len(),
            "packed split feature out of range for {} features",
            features.len()
        );

        root_values[lane] = features[tree.features[ROOT] as usize];
        root_thresholds[lane] = tree.thresholds[ROOT];

        // The level-1 node this lane's outcome hangs off.
        let slot = if spec.root_right { RIGHT } else { LEFT };
        level2_values[lane] = features[tree.features[slot] as usize];
        level2_thresholds[lane] = tree.thresholds[slot];

        leaves[lane] = tree.leaves[spec.leaf];
    }

    let root_mask = f32x8::from(root_values).cmp_le(f32x8::from(root_thresholds))
        ^ complement_pattern(|spec| spec.root_right);
    let level2_mask = f32x8::from(level2_values).cmp_le(f32x8::from(level2_thresholds))
        ^ complement_pattern(|spec| spec.level2_right);

    let mask = root_mask & level2_mask;
    let selected = mask.blend(f32x8::from(leaves), f32x8::ZERO);

    (selected.reduce_add(), mask_bits(mask))
}

/// All-ones bit pattern in the lanes `flip` selects, zero elsewhere.
/// XORing a comparison mask with it complements exactly those lanes.
#[inline]
fn complement_pattern(flip: impl Fn(&LaneSpec) -> bool) -> f32x8 {
    let mut lanes = [0.0f32; LANES];
    for (lane, spec) in lanes.iter_mut().zip(LANE_TABLE.iter()) {
        if flip(spec) {
            *lane = f32::from_bits(u32::MAX);
        }
    }
    f32x8::from(lanes)
}

#[inline]
fn mask_bits(mask: f32x8) -> u8 {
    let mut bits = 0u8;
    for (lane, value) in mask.to_array().iter().enumerate() {
        if value.to_bits() != 0 {
            bits |= 1 << lane;
        }
    }
    bits
}
