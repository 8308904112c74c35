//! Iteration over immediate children and subtrees.
//!
//! All iterators here borrow the [`SceneTree`] immutably, so the tree cannot be
//! restructured (children added, detached or despawned) while one is alive.
//! This does not compile:
//!
//! ```compile_fail,E0502
//! use arbor_scene::SceneTree;
//!
//! let mut tree = SceneTree::new();
//! let parent = tree.create("Parent");
//! let first = tree.create("first");
//! tree.add_child(parent, first).unwrap();
//!
//! let mut children = tree.children(parent).unwrap();
//! let extra = tree.create("extra");
//! tree.add_child(parent, extra).unwrap();
//! children.next();
//! ```
//!
//! Collect the handles first when the loop body needs to mutate:
//!
//! ```
//! use arbor_scene::{Node, SceneTree};
//!
//! let mut tree = SceneTree::new();
//! let parent = tree.create("Parent");
//! tree.spawn_child(parent, Node::new("first")).unwrap();
//!
//! let ids: Vec<_> = tree.children(parent).unwrap().map(|c| c.id()).collect();
//! for id in ids {
//!     tree.spawn_child(id, Node::new("leaf")).unwrap();
//! }
//! assert_eq!(tree.len(), 3);
//! ```

use std::iter::FusedIterator;

use crate::node::NodeId;
use crate::tree::SceneTree;
use crate::view::NodeRef;

/// A position within the children of one node.
///
/// Obtained from [`NodeRef::begin`] and [`NodeRef::end`]. Positions can be
/// compared for equality and advanced one step at a time; there is no way to
/// step backwards or jump.
///
/// ```
/// use arbor_scene::SceneTree;
///
/// let mut tree = SceneTree::new();
/// let parent = tree.create("Parent");
/// for name in ["a", "b"] {
///     let child = tree.create(name);
///     tree.add_child(parent, child).unwrap();
/// }
///
/// let parent = tree.node(parent).unwrap();
/// let mut names = Vec::new();
/// let mut cursor = parent.begin();
/// while cursor != parent.end() {
///     names.push(cursor.get().unwrap().name());
///     cursor.advance();
/// }
/// assert_eq!(names, ["a", "b"]);
/// ```
#[derive(Clone, Copy)]
pub struct ChildCursor<'a> {
    tree: &'a SceneTree,
    parent: NodeId,
    ids: &'a [NodeId],
    pos: usize,
}

impl<'a> ChildCursor<'a> {
    pub(crate) fn new(
        tree: &'a SceneTree,
        parent: NodeId,
        ids: &'a [NodeId],
        pos: usize,
    ) -> Self {
        Self {
            tree,
            parent,
            ids,
            pos,
        }
    }

    /// Zero-based position; equal to the child count at the end.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_end(&self) -> bool {
        self.pos >= self.ids.len()
    }

    /// Step to the next child. Stays put once the end is reached.
    pub fn advance(&mut self) {
        if !self.is_end() {
            self.pos += 1;
        }
    }

    /// The child at this position, `None` at the end.
    pub fn get(&self) -> Option<NodeRef<'a>> {
        let id = *self.ids.get(self.pos)?;
        self.tree.node(id).ok()
    }
}

impl PartialEq for ChildCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree)
            && self.parent == other.parent
            && self.pos == other.pos
    }
}

impl Eq for ChildCursor<'_> {}

impl std::fmt::Debug for ChildCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildCursor")
            .field("parent", &self.parent)
            .field("pos", &self.pos)
            .field("len", &self.ids.len())
            .finish()
    }
}

/// Forward iterator over the immediate children of a node, in insertion order.
///
/// Walks from a begin position to an end position captured when the iterator
/// was created.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    front: ChildCursor<'a>,
    end: ChildCursor<'a>,
}

impl<'a> Children<'a> {
    pub(crate) fn new(begin: ChildCursor<'a>, end: ChildCursor<'a>) -> Self {
        Self { front: begin, end }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<NodeRef<'a>> {
        if self.front == self.end {
            return None;
        }
        let node = self.front.get();
        self.front.advance();
        node
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.pos.saturating_sub(self.front.pos);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Children<'_> {}

impl FusedIterator for Children<'_> {}

/// Depth-first, pre-order iterator over every node below a starting node.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    tree: &'a SceneTree,
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(tree: &'a SceneTree, children: &[NodeId]) -> Self {
        Self {
            tree,
            stack: children.iter().rev().copied().collect(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<NodeRef<'a>> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id).ok()?;
        self.stack.extend(node.node().children().iter().rev().copied());
        Some(node)
    }
}

impl FusedIterator for Descendants<'_> {}
