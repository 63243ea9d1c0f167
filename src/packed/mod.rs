//! Packed dual-tree records and their forest container.
//!
//! Packing is a pure, order-preserving repacking of scalar depth-2 trees
//! into fixed-size records laid out for 8-lane SIMD consumption. Records
//! are derived data: they can always be regenerated from the scalar trees.

pub mod layout;

mod forest;
mod pair;

pub use forest::PackedForest;
pub use pair::{PackedTree, PackedTreePair};
