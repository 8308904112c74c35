//! Arbor Scene - the node hierarchy every engine object lives in.
//!
//! A [`SceneTree`] stores named [`Node`]s. Each node exclusively owns its
//! children (kept in insertion order) and holds a non-owning back-reference to
//! its parent, so despawning a node tears down its whole subtree and no
//! reference cycles can form.
//!
//! Lookups never fabricate nodes: a missing child, an index past the end or
//! parent access on a root are all reported through [`SceneError`].
//!
//! ## Quick Start
//!
//! ```
//! use arbor_scene::{Node, SceneError, SceneTree};
//!
//! let mut tree = SceneTree::new();
//! let parent = tree.create("Parent");
//! for name in ["Child1", "Child2", "Child3"] {
//!     tree.spawn_child(parent, Node::new(name)).unwrap();
//! }
//!
//! let parent = tree.node(parent).unwrap();
//! assert_eq!(parent.len(), 3);
//! assert_eq!(parent.at(1).unwrap().name(), "Child2");
//! assert!(matches!(parent.at(3), Err(SceneError::OutOfRange { .. })));
//!
//! let names: Vec<_> = parent.children().map(|c| c.name()).collect();
//! assert_eq!(names, ["Child1", "Child2", "Child3"]);
//! ```
//!
//! ## Threading
//!
//! The tree is a plain single-threaded container. Structural changes need
//! `&mut SceneTree` and every view or iterator borrows it, so mutation during
//! iteration is rejected at compile time.

pub mod error;
pub mod iter;
pub mod node;
pub mod object;
pub mod tree;
pub mod view;

pub use error::{SceneError, SceneResult};
pub use iter::{ChildCursor, Children, Descendants};
pub use node::{Node, NodeId};
pub use object::Object;
pub use tree::SceneTree;
pub use view::{NodeMut, NodeRef};
