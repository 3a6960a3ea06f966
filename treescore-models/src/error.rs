use ts_core::error::EvalError;
use ts_data::load::LoadError;

/// Failure to build a forest or an evaluator over it.  These are fatal for the input
/// that caused them: fix the input and construct again.
#[derive(Debug, thiserror::Error)]
pub enum ForestError {
    /// A node is neither a valid leaf nor a valid internal node
    #[error("malformed node in tree {tree} at {path}: {reason}")]
    MalformedNode {
        /// Index of the tree within the forest
        tree: usize,
        /// Path from the root, e.g. `root.left.right`
        path: String,
        /// What is wrong with the node
        reason: &'static str,
    },

    /// The compiled arena cannot be addressed with 32-bit offsets
    #[error("forest has more than {max} nodes", max = u32::MAX)]
    TooLarge,

    /// Reading the serialized forest failed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Writing the serialized forest failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The worker pool could not be created
    #[error(transparent)]
    Pool(#[from] EvalError),
}
