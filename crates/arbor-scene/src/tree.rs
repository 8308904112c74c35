//! Scene tree storage and structural operations.

use arbor_core::alloc::{HashSet, SlotArena};
use arbor_core::profiling::profile_function;

use crate::error::{SceneError, SceneResult};
use crate::iter::{Children, Descendants};
use crate::node::{Node, NodeId};
use crate::view::{NodeMut, NodeRef};

/// Owner of every node in a hierarchy.
///
/// Roots are owned by the tree itself; every other node is owned by the
/// children list of its parent. Despawning a node destroys its whole subtree,
/// and dropping the tree destroys everything.
///
/// # Example
///
/// ```
/// use arbor_scene::SceneTree;
///
/// let mut tree = SceneTree::new();
/// let parent = tree.create("Parent");
/// let child = tree.create("Child");
/// tree.add_child(parent, child).unwrap();
///
/// let found = tree.node(parent).unwrap().find("Child").unwrap();
/// assert_eq!(found.id(), child);
/// assert_eq!(found.parent().unwrap().id(), parent);
/// ```
#[derive(Debug, Default)]
pub struct SceneTree {
    nodes: SlotArena<Node>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotArena::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
        }
    }

    /// Total number of live nodes across all hierarchies in this tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id.0)
    }

    /// Take ownership of a detached node, returning its handle.
    pub fn insert(&mut self, node: Node) -> NodeId {
        debug_assert!(node.parent.is_none() && node.children.is_empty() && !node.pinned);
        NodeId(self.nodes.insert(node))
    }

    /// Shorthand for `insert(Node::new(name))`.
    pub fn create(&mut self, name: impl Into<String>) -> NodeId {
        self.insert(Node::new(name))
    }

    pub fn get(&self, id: NodeId) -> SceneResult<&Node> {
        self.nodes.get(id.0).ok_or(SceneError::StaleNode(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> SceneResult<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(SceneError::StaleNode(id))
    }

    /// Read-only view of a node.
    pub fn node(&self, id: NodeId) -> SceneResult<NodeRef<'_>> {
        let node = self.get(id)?;
        Ok(NodeRef::new(self, id, node))
    }

    /// Mutable view of a node.
    pub fn node_mut(&mut self, id: NodeId) -> SceneResult<NodeMut<'_>> {
        self.get(id)?;
        Ok(NodeMut::new(self, id))
    }

    /// Pin the root `id` so it stays a root for as long as it lives.
    ///
    /// A pinned node is rejected as the child of [`add_child`](Self::add_child)
    /// and by [`despawn`](Self::despawn) with [`SceneError::PinnedRoot`]. It is
    /// only destroyed when the tree is dropped.
    pub fn pin(&mut self, id: NodeId) -> SceneResult<()> {
        let node = self.get_mut(id)?;
        if let Some(parent) = node.parent {
            return Err(SceneError::AlreadyParented { child: id, parent });
        }
        node.pinned = true;
        tracing::debug!("Pinned root {}", id);
        Ok(())
    }

    /// Shorthand for `create(name)` followed by [`pin`](Self::pin).
    pub fn create_pinned(&mut self, name: impl Into<String>) -> NodeId {
        let mut node = Node::new(name);
        node.pinned = true;
        NodeId(self.nodes.insert(node))
    }

    pub fn is_pinned(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(Node::is_pinned)
    }

    /// Append `child` to the end of `parent`'s children.
    ///
    /// Ownership of `child` moves from the tree to `parent`. A node that
    /// already has a parent is rejected with [`SceneError::AlreadyParented`];
    /// [`detach`](Self::detach) it first to move it elsewhere.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        profile_function!();
        self.get(parent)?;
        let child_node = self.get(child)?;

        if child_node.pinned {
            tracing::warn!("Refusing to add pinned root {} under {}", child, parent);
            return Err(SceneError::PinnedRoot(child));
        }

        if let Some(current) = child_node.parent {
            tracing::warn!(
                "Refusing to add {} ('{}') under {}: already a child of {}",
                child,
                child_node.name(),
                parent,
                current
            );
            return Err(SceneError::AlreadyParented {
                child,
                parent: current,
            });
        }

        if self.is_ancestor_or_self(child, parent) {
            tracing::warn!("Refusing to add {} under {}: would create a cycle", child, parent);
            return Err(SceneError::CycleDetected { child, parent });
        }

        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);

        tracing::debug!("Added {} as child of {}", child, parent);
        Ok(())
    }

    /// Insert `node` and adopt it under `parent` in one step.
    pub fn spawn_child(&mut self, parent: NodeId, node: Node) -> SceneResult<NodeId> {
        self.get(parent)?;
        let child = self.insert(node);
        self.add_child(parent, child)?;
        Ok(child)
    }

    /// Remove `child` from its parent's children, turning it back into a root.
    ///
    /// Returns the former parent. The order of the remaining siblings is kept.
    pub fn detach(&mut self, child: NodeId) -> SceneResult<NodeId> {
        let child_node = self.get(child)?;
        let parent = child_node.parent.ok_or_else(|| SceneError::NoParent {
            name: child_node.name().to_string(),
        })?;

        let siblings = &mut self.get_mut(parent)?.children;
        if let Some(pos) = siblings.iter().position(|&id| id == child) {
            siblings.remove(pos);
        }
        self.get_mut(child)?.parent = None;

        tracing::debug!("Detached {} from {}", child, parent);
        Ok(parent)
    }

    /// Destroy `id` and every node below it.
    ///
    /// The node is detached from its parent first. Returns the number of
    /// destroyed nodes; all of their handles become stale. Pinned roots are
    /// rejected with [`SceneError::PinnedRoot`].
    pub fn despawn(&mut self, id: NodeId) -> SceneResult<usize> {
        profile_function!();
        let node = self.get(id)?;
        if node.pinned {
            return Err(SceneError::PinnedRoot(id));
        }
        if node.parent.is_some() {
            self.detach(id)?;
        }

        let mut stack = vec![id];
        let mut destroyed = 0;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current.0) {
                stack.extend(node.children.iter().copied());
                destroyed += 1;
            }
        }

        tracing::debug!("Despawned {} ({} nodes)", id, destroyed);
        Ok(destroyed)
    }

    /// Handle of the child at `index` in insertion order.
    pub fn child_at(&self, parent: NodeId, index: usize) -> SceneResult<NodeId> {
        let node = self.get(parent)?;
        node.children
            .get(index)
            .copied()
            .ok_or(SceneError::OutOfRange {
                index,
                len: node.children.len(),
            })
    }

    /// Handle of the first immediate child named exactly `name`.
    pub fn find_child(&self, parent: NodeId, name: &str) -> SceneResult<NodeId> {
        profile_function!();
        let node = self.get(parent)?;
        node.children
            .iter()
            .copied()
            .find(|&child| {
                self.nodes
                    .get(child.0)
                    .is_some_and(|node| node.name() == name)
            })
            .ok_or_else(|| SceneError::NodeNotFound {
                name: name.to_string(),
            })
    }

    /// Handle of the parent of `id`, or [`SceneError::NoParent`] for a root.
    pub fn parent_of(&self, id: NodeId) -> SceneResult<NodeId> {
        let node = self.get(id)?;
        node.parent.ok_or_else(|| SceneError::NoParent {
            name: node.name().to_string(),
        })
    }

    /// Forward iterator over the immediate children of `id`.
    pub fn children(&self, id: NodeId) -> SceneResult<Children<'_>> {
        Ok(self.node(id)?.children())
    }

    /// Depth-first, pre-order walk over everything below `id`.
    pub fn descendants(&self, id: NodeId) -> SceneResult<Descendants<'_>> {
        Ok(self.node(id)?.descendants())
    }

    /// Handles of all nodes without a parent, in storage order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(key, _)| NodeId(key))
    }

    /// Whether `ancestor` is `node` itself or appears on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        // The parent chain is acyclic, so it is at most `len` long.
        for _ in 0..=self.nodes.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.nodes.get(id.0).and_then(|n| n.parent),
                None => return false,
            }
        }
        false
    }

    /// Check the structural invariants of every hierarchy in the tree:
    /// each child points back at the parent listing it, no node is listed by
    /// two parents, every listed child is live, and parent chains terminate.
    pub fn is_consistent(&self) -> bool {
        let mut listed = HashSet::new();

        for (key, node) in self.nodes.iter() {
            let id = NodeId(key);
            for &child in &node.children {
                if !listed.insert(child) {
                    tracing::error!("{} is listed as a child more than once", child);
                    return false;
                }
                match self.nodes.get(child.0) {
                    Some(child_node) if child_node.parent == Some(id) => {}
                    Some(_) => {
                        tracing::error!("{} does not point back at its parent {}", child, id);
                        return false;
                    }
                    None => {
                        tracing::error!("{} lists stale child {}", id, child);
                        return false;
                    }
                }
            }
        }

        for (key, node) in self.nodes.iter() {
            let id = NodeId(key);
            let listed_by_parent = node.parent.is_none_or(|parent| {
                self.nodes
                    .get(parent.0)
                    .is_some_and(|p| p.children.contains(&id))
            });
            if !listed_by_parent {
                tracing::error!("{} has a parent that does not list it", id);
                return false;
            }
            if let Some(parent) = node.parent
                && self.is_ancestor_or_self(id, parent)
            {
                tracing::error!("{} is its own ancestor", id);
                return false;
            }
        }

        true
    }
}
