//! Node records and handles.

use std::fmt;
use std::ops::Index;

use arbor_core::alloc::SlotKey;

use crate::error::SceneError;
use crate::object::Object;

/// Handle to a node stored in a [`SceneTree`](crate::SceneTree).
///
/// Handles are generational: once the node is despawned every copy of its
/// handle is rejected with [`SceneError::StaleNode`], even if the storage slot
/// is reused by a later node. A handle never keeps a node alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) SlotKey);

impl NodeId {
    /// Raw slot index, mostly useful for debugging output.
    pub fn index(&self) -> u32 {
        self.0.index()
    }

    pub fn generation(&self) -> u32 {
        self.0.generation()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index(), self.generation())
    }
}

/// A single element of the hierarchy.
///
/// A freshly constructed `Node` is detached: no parent and no children. It
/// joins a hierarchy by being inserted into a [`SceneTree`](crate::SceneTree),
/// which then manages its links. The children list is the only owning edge to
/// each child; `parent` is a plain back-reference used for navigation.
pub struct Node {
    name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) object: Option<Box<dyn Object>>,
    pub(crate) pinned: bool,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            object: None,
            pinned: false,
        }
    }

    /// Attach behaviour that is driven by the engine and dropped with the node.
    pub fn with_object(mut self, object: impl Object) -> Self {
        self.object = Some(Box::new(object));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether the node is pinned as a permanent root. See [`SceneTree::pin`](crate::SceneTree::pin).
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Immediate children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of immediate children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn object(&self) -> Option<&dyn Object> {
        self.object.as_deref()
    }

    pub fn object_mut(&mut self) -> Option<&mut (dyn Object + 'static)> {
        self.object.as_deref_mut()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("has_object", &self.object.is_some())
            .field("pinned", &self.pinned)
            .finish()
    }
}

/// `node[i]` is the panicking form of [`NodeRef::at`](crate::NodeRef::at).
///
/// It yields the child's handle, not a view: `node[i] == view.at(i)?.id()`.
/// Past the end it panics with the [`SceneError::OutOfRange`] message instead
/// of returning it.
impl Index<usize> for Node {
    type Output = NodeId;

    fn index(&self, index: usize) -> &NodeId {
        match self.children.get(index) {
            Some(id) => id,
            None => panic!(
                "{}",
                SceneError::OutOfRange {
                    index,
                    len: self.children.len(),
                }
            ),
        }
    }
}
