//! Error types for scene tree operations.

use std::fmt;

use crate::node::NodeId;

/// Errors returned by lookups and structural changes on a [`SceneTree`].
///
/// [`SceneTree`]: crate::SceneTree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Positional lookup past the last child.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of children at the time of the lookup.
        len: usize,
    },

    /// No immediate child carries the requested name.
    NodeNotFound {
        /// The name that was searched for.
        name: String,
    },

    /// The node to adopt already belongs to another parent.
    ///
    /// Call [`SceneTree::detach`](crate::SceneTree::detach) first to move it.
    AlreadyParented {
        /// The node that was offered as a child.
        child: NodeId,
        /// Its current parent.
        parent: NodeId,
    },

    /// Parent access on a root node.
    NoParent {
        /// Name of the root node.
        name: String,
    },

    /// Adopting the node would make it its own ancestor.
    CycleDetected {
        /// The node that was offered as a child.
        child: NodeId,
        /// The node that would have adopted it.
        parent: NodeId,
    },

    /// The handle refers to a node that was despawned (or never existed in
    /// this tree).
    StaleNode(NodeId),

    /// The node is pinned as a root and cannot be adopted or despawned.
    PinnedRoot(NodeId),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::OutOfRange { index, len } => {
                write!(f, "Child index {} out of range (node has {} children)", index, len)
            }
            SceneError::NodeNotFound { name } => {
                write!(f, "Failed to find the child: {}", name)
            }
            SceneError::AlreadyParented { child, parent } => {
                write!(f, "Node {} is already a child of {}", child, parent)
            }
            SceneError::NoParent { name } => {
                write!(f, "Node '{}' is a root and has no parent", name)
            }
            SceneError::CycleDetected { child, parent } => {
                write!(
                    f,
                    "Adding {} under {} would make it its own ancestor",
                    child, parent
                )
            }
            SceneError::StaleNode(id) => write!(f, "Node {} does not exist", id),
            SceneError::PinnedRoot(id) => write!(f, "Node {} is a pinned root", id),
        }
    }
}

impl std::error::Error for SceneError {}

/// Result type alias for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
