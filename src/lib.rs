//! shallow-forest: branch-free evaluation of shallow decision tree ensembles.
//!
//! This crate evaluates forests of fixed-shape shallow trees (depth-1 stumps
//! and depth-2 trees) against a shared feature vector using lane-parallel
//! compare/select/reduce arithmetic instead of pointer-chasing traversal.
//! The scalar traversal model is kept as the correctness oracle, and the
//! packed SIMD path is verified against it before it is trusted.

pub mod forest;
pub mod packed;
pub mod predict;
pub mod testing;
pub mod trees;
