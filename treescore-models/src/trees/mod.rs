/// The basic binary tree and its reference traversal
mod base;

/// Forest definition and validation against the serialized schema
mod forest;

pub use self::base::{Tree, TreeNode};
pub use self::forest::Forest;
