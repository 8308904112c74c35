//! Arbor - a scene-graph driven engine scaffold
//!
//! Everything in an Arbor program lives in a tree of named nodes. The
//! [`Engine`] is the root of that tree and its immediate children are the
//! engine's systems.
//!
//! - **Scene tree**: ownership, lookup by index or name, and child iteration
//!   ([`scene`])
//! - **Engine**: registers systems and forwards lifecycle calls to them
//! - **Core**: logging, profiling and configuration shared by all crates ([`core`])
//!
//! # Quick Start
//!
//! ```
//! use arbor::prelude::*;
//!
//! #[derive(Default)]
//! struct Physics {
//!     steps: u32,
//! }
//!
//! impl Object for Physics {
//!     fn update(&mut self, _dt: f64) {
//!         self.steps += 1;
//!     }
//! }
//!
//! let mut engine = Engine::builder()
//!     .add_system("physics", Physics::default())
//!     .build()
//!     .unwrap();
//!
//! engine.initialize().unwrap();
//! engine.update(1.0 / 60.0).unwrap();
//!
//! let physics = engine.system("physics").unwrap();
//! assert_eq!(physics.parent().unwrap().name(), "Engine");
//! ```
//!
//! # Architecture
//!
//! Nodes are stored in a [`SceneTree`] and addressed by generational
//! [`NodeId`] handles. A node's children list is the only thing that owns its
//! children, so removing a system removes everything below it. The engine does
//! not run a frame loop; the embedding application calls
//! [`Engine::update`] once per tick.

pub mod engine;
pub mod error;

// Re-export sub-crates
pub use arbor_core as core;
pub use arbor_scene as scene;

pub use arbor_core::{Config, ProfilingMode};
pub use arbor_scene::{
    ChildCursor, Children, Descendants, Node, NodeId, NodeMut, NodeRef, Object, SceneError,
    SceneResult, SceneTree,
};

// Re-export engine types
pub use engine::{Engine, EngineBuilder};
pub use error::{EngineError, EngineResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{Engine, EngineBuilder};
    pub use crate::error::{EngineError, EngineResult};

    pub use arbor_core::{Config, ProfilingMode};
    pub use arbor_scene::{Node, NodeId, NodeMut, NodeRef, Object, SceneError, SceneTree};
}
