//! Scalar tree data structures.

pub mod node;
pub mod tree;

pub use node::Node;
pub use tree::{Tree, TreeValidationError, DEPTH2_NODE_COUNT};
