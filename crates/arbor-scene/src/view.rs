//! Borrowed views over a node and its surroundings.

use std::fmt;
use std::ops::Index;

use crate::error::SceneResult;
use crate::iter::{ChildCursor, Children, Descendants};
use crate::node::{Node, NodeId};
use crate::object::Object;
use crate::tree::SceneTree;

/// Read-only view of a node inside a [`SceneTree`].
///
/// Equality is identity: two views are equal when they point at the same
/// node, regardless of names.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a SceneTree,
    id: NodeId,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(tree: &'a SceneTree, id: NodeId, node: &'a Node) -> Self {
        Self { tree, id, node }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        self.node.name()
    }

    /// The underlying node record.
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn tree(&self) -> &'a SceneTree {
        self.tree
    }

    pub fn is_root(&self) -> bool {
        self.node.is_root()
    }

    /// Parent handle, `None` for a root.
    pub fn parent_id(&self) -> Option<NodeId> {
        self.node.parent()
    }

    /// The parent node, or [`SceneError::NoParent`](crate::SceneError::NoParent) for a root.
    pub fn parent(&self) -> SceneResult<NodeRef<'a>> {
        let parent = self.tree.parent_of(self.id)?;
        self.tree.node(parent)
    }

    /// The child at `index` in insertion order.
    pub fn at(&self, index: usize) -> SceneResult<NodeRef<'a>> {
        let child = self.tree.child_at(self.id, index)?;
        self.tree.node(child)
    }

    /// The first immediate child named exactly `name`.
    ///
    /// Only direct children are searched. When several share the name the
    /// earliest inserted wins.
    pub fn find(&self, name: &str) -> SceneResult<NodeRef<'a>> {
        let child = self.tree.find_child(self.id, name)?;
        self.tree.node(child)
    }

    /// Number of immediate children.
    pub fn len(&self) -> usize {
        self.node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_empty()
    }

    /// Position of the first child.
    pub fn begin(&self) -> ChildCursor<'a> {
        ChildCursor::new(self.tree, self.id, self.node.children(), 0)
    }

    /// Position one past the last child.
    pub fn end(&self) -> ChildCursor<'a> {
        let children = self.node.children();
        ChildCursor::new(self.tree, self.id, children, children.len())
    }

    /// Immediate children in insertion order.
    pub fn children(&self) -> Children<'a> {
        Children::new(self.begin(), self.end())
    }

    /// Everything below this node, depth-first in pre-order.
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants::new(self.tree, self.node.children())
    }

    pub fn object(&self) -> Option<&'a dyn Object> {
        self.node.object()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

/// `node[i]` is the panicking form of [`at`](NodeRef::at).
///
/// `Index` has to hand out a reference, so it yields the child's [`NodeId`]
/// rather than a [`NodeRef`]; `node[i] == node.at(i)?.id()` for every valid `i`.
/// Past the end it panics with the [`SceneError::OutOfRange`](crate::SceneError::OutOfRange)
/// message that `at` returns.
impl Index<usize> for NodeRef<'_> {
    type Output = NodeId;

    fn index(&self, index: usize) -> &NodeId {
        &self.node[index]
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("children", &self.len())
            .finish()
    }
}

impl<'a> IntoIterator for NodeRef<'a> {
    type Item = NodeRef<'a>;
    type IntoIter = Children<'a>;

    fn into_iter(self) -> Children<'a> {
        self.children()
    }
}

impl<'a> IntoIterator for &NodeRef<'a> {
    type Item = NodeRef<'a>;
    type IntoIter = Children<'a>;

    fn into_iter(self) -> Children<'a> {
        self.children()
    }
}

/// Mutable view of a node inside a [`SceneTree`].
///
/// Navigation methods consume the view so the returned view can borrow the
/// tree for the full lifetime; call [`as_view`](Self::as_view) for read-only
/// lookups that keep this view usable.
pub struct NodeMut<'a> {
    tree: &'a mut SceneTree,
    id: NodeId,
}

impl<'a> NodeMut<'a> {
    pub(crate) fn new(tree: &'a mut SceneTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn as_view(&self) -> NodeRef<'_> {
        match self.tree.node(self.id) {
            Ok(view) => view,
            // A NodeMut is only built for a live id and holds the only borrow
            // of the tree, so the node cannot have been despawned.
            Err(_) => unreachable!("NodeMut outlived its node {}", self.id),
        }
    }

    pub fn name(&self) -> &str {
        self.as_view().name()
    }

    pub fn len(&self) -> usize {
        self.as_view().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_view().is_empty()
    }

    pub fn parent_mut(self) -> SceneResult<NodeMut<'a>> {
        let parent = self.tree.parent_of(self.id)?;
        self.tree.node_mut(parent)
    }

    pub fn at_mut(self, index: usize) -> SceneResult<NodeMut<'a>> {
        let child = self.tree.child_at(self.id, index)?;
        self.tree.node_mut(child)
    }

    pub fn find_mut(self, name: &str) -> SceneResult<NodeMut<'a>> {
        let child = self.tree.find_child(self.id, name)?;
        self.tree.node_mut(child)
    }

    /// Adopt the detached node `child`. See [`SceneTree::add_child`].
    pub fn add_child(&mut self, child: NodeId) -> SceneResult<()> {
        self.tree.add_child(self.id, child)
    }

    /// Insert `node` and adopt it. See [`SceneTree::spawn_child`].
    pub fn spawn_child(&mut self, node: Node) -> SceneResult<NodeId> {
        self.tree.spawn_child(self.id, node)
    }

    pub fn object_mut(&mut self) -> Option<&mut (dyn Object + 'static)> {
        self.tree.get_mut(self.id).ok()?.object_mut()
    }

    /// Replace the attached behaviour, returning the previous one.
    pub fn set_object(&mut self, object: impl Object) -> SceneResult<Option<Box<dyn Object>>> {
        let node = self.tree.get_mut(self.id)?;
        Ok(node.object.replace(Box::new(object)))
    }
}

impl fmt::Debug for NodeMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeMut")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}
