//! Engine core - owns the scene tree and drives the systems registered under its root.

use arbor_core::profiling::{self, ProfilingBackend, profile_function};
use arbor_core::{Config, ProfilingMode, logging};
use arbor_scene::{Node, NodeId, NodeMut, NodeRef, Object, SceneTree};

use crate::error::{EngineError, EngineResult};

/// The root of the scene tree.
///
/// Every immediate child of the root is a system: a named node carrying an
/// [`Object`]. The engine forwards lifecycle calls to its systems in the order
/// they were registered, and shuts them down in reverse order.
///
/// The engine does not own a frame loop. Callers decide when to call
/// [`update`](Engine::update) and with what delta.
///
/// # Example
///
/// ```
/// use arbor::{Engine, Object};
///
/// struct Physics;
/// impl Object for Physics {}
///
/// let mut engine = Engine::builder()
///     .add_system("physics", Physics)
///     .build()
///     .unwrap();
///
/// engine.initialize().unwrap();
/// engine.update(1.0 / 60.0).unwrap();
/// engine.stop();
///
/// assert_eq!(engine.system("physics").unwrap().name(), "physics");
/// ```
pub struct Engine {
    tree: SceneTree,
    root: NodeId,
    config: Config,
    running: bool,
}

impl Engine {
    /// Create a new engine builder.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// An engine with no systems and the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// An engine with no systems whose root node is named after `config.name`.
    pub fn with_config(config: Config) -> Self {
        let mut tree = SceneTree::new();
        let root = tree.create_pinned(config.name.clone());
        Self {
            tree,
            root,
            config,
            running: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle of the engine's root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// View of the root node.
    pub fn root_node(&self) -> EngineResult<NodeRef<'_>> {
        Ok(self.tree.node(self.root)?)
    }

    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    /// Direct access to the tree.
    ///
    /// The root is pinned: adopting it under another node or despawning it
    /// fails with [`SceneError::PinnedRoot`](arbor_scene::SceneError::PinnedRoot).
    /// Plain nodes added under the root are visited by dispatch but have no
    /// hooks to call.
    pub fn tree_mut(&mut self) -> &mut SceneTree {
        &mut self.tree
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Register `system` as the last immediate child of the root.
    ///
    /// Registering while running does not call `initialize` on the new system.
    pub fn add_system(
        &mut self,
        name: impl Into<String>,
        system: impl Object,
    ) -> EngineResult<NodeId> {
        self.attach(Node::new(name).with_object(system))
    }

    fn attach(&mut self, node: Node) -> EngineResult<NodeId> {
        if self.tree.find_child(self.root, node.name()).is_ok() {
            tracing::warn!(
                "System '{}' shadows an existing system with the same name",
                node.name()
            );
        }
        let id = self.tree.spawn_child(self.root, node)?;
        tracing::debug!("Registered system {}", id);
        Ok(id)
    }

    /// Look up a system by exact name. The earliest registered one wins.
    pub fn system(&self, name: &str) -> EngineResult<NodeRef<'_>> {
        Ok(self.root_node()?.find(name)?)
    }

    pub fn system_mut(&mut self, name: &str) -> EngineResult<NodeMut<'_>> {
        Ok(self.tree.node_mut(self.root)?.find_mut(name)?)
    }

    /// Names of all systems in registration order.
    pub fn system_names(&self) -> EngineResult<Vec<&str>> {
        Ok(self.root_node()?.children().map(|system| system.name()).collect())
    }

    /// Destroy a system and everything below it, returning the number of nodes removed.
    ///
    /// A running engine shuts the system down before it is dropped.
    pub fn remove_system(&mut self, name: &str) -> EngineResult<usize> {
        let id = self.tree.find_child(self.root, name)?;
        if self.running
            && let Some(system) = self.tree.get_mut(id)?.object_mut()
        {
            system.shutdown();
        }
        let removed = self.tree.despawn(id)?;
        tracing::debug!("Removed system '{}' ({} nodes)", name, removed);
        Ok(removed)
    }

    /// Call [`Object::initialize`] on every system and mark the engine as running.
    pub fn initialize(&mut self) -> EngineResult<()> {
        if self.running {
            return Err(EngineError::AlreadyRunning);
        }
        let systems = self.system_ids()?;
        tracing::info!(
            "Initializing engine '{}' with {} systems",
            self.config.name,
            systems.len()
        );
        self.dispatch(systems, |system| system.initialize())?;
        self.running = true;
        Ok(())
    }

    /// Forward one update tick to every system, in registration order.
    pub fn update(&mut self, dt: f64) -> EngineResult<()> {
        profile_function!();
        if !self.running {
            return Err(EngineError::NotRunning);
        }
        if self.config.profiling != ProfilingMode::Off {
            profiling::new_frame();
        }
        let systems = self.system_ids()?;
        self.dispatch(systems, |system| system.update(dt))
    }

    /// Forward one fixed-step tick to every system, in registration order.
    pub fn fixed_update(&mut self, dt: f64) -> EngineResult<()> {
        profile_function!();
        if !self.running {
            return Err(EngineError::NotRunning);
        }
        let systems = self.system_ids()?;
        self.dispatch(systems, |system| system.fixed_update(dt))
    }

    /// Shut every system down in reverse registration order.
    ///
    /// Does nothing if the engine is not running.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;

        let result = self.system_ids().and_then(|systems| {
            self.dispatch(systems.into_iter().rev(), |system| system.shutdown())
        });
        match result {
            Ok(()) => tracing::info!("Engine '{}' stopped", self.config.name),
            Err(err) => {
                tracing::error!("Engine '{}' stopped uncleanly: {}", self.config.name, err)
            }
        }
    }

    /// Snapshot of the root's children, so hooks run against a fixed list.
    fn system_ids(&self) -> EngineResult<Vec<NodeId>> {
        Ok(self.tree.get(self.root)?.children().to_vec())
    }

    fn dispatch(
        &mut self,
        systems: impl IntoIterator<Item = NodeId>,
        mut hook: impl FnMut(&mut (dyn Object + 'static)),
    ) -> EngineResult<()> {
        for id in systems {
            if let Some(system) = self.tree.get_mut(id)?.object_mut() {
                hook(system);
            }
        }
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("name", &self.config.name)
            .field("root", &self.root)
            .field("nodes", &self.tree.len())
            .field("running", &self.running)
            .finish()
    }
}

/// Builder for constructing an [`Engine`] with systems.
///
/// # Example
///
/// ```
/// use arbor::{Config, EngineBuilder, Object};
///
/// struct Audio;
/// impl Object for Audio {}
///
/// let engine = EngineBuilder::new()
///     .with_config(Config::default().with_name("Game"))
///     .add_system("audio", Audio)
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.root_node().unwrap().name(), "Game");
/// ```
pub struct EngineBuilder {
    config: Config,
    systems: Vec<Node>,
    logging: bool,
}

impl EngineBuilder {
    /// Create a new engine builder.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            systems: Vec::new(),
            logging: false,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Install the global `tracing` subscriber on build, using the configured
    /// log filter when `RUST_LOG` is unset.
    pub fn with_logging(mut self) -> Self {
        self.logging = true;
        self
    }

    /// Add a system. Systems are registered in the order they are added.
    pub fn add_system(mut self, name: impl Into<String>, system: impl Object) -> Self {
        self.systems.push(Node::new(name).with_object(system));
        self
    }

    /// Build the engine.
    ///
    /// This will:
    /// 1. Install logging, if requested
    /// 2. Start profiling according to [`Config::profiling`]
    /// 3. Register every system under the root
    pub fn build(self) -> EngineResult<Engine> {
        if self.logging && !logging::init_with_filter(&self.config.log_filter) {
            tracing::debug!("A global tracing subscriber was already installed");
        }
        if let Some(backend) = ProfilingBackend::from_mode(self.config.profiling) {
            profiling::init_profiling(backend);
        }

        let mut engine = Engine::with_config(self.config);
        for system in self.systems {
            engine.attach(system)?;
        }

        tracing::info!(
            "Engine '{}' built with {} systems",
            engine.config.name,
            engine.tree.get(engine.root)?.len()
        );
        Ok(engine)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use arbor_scene::SceneError;

    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records every hook call as "<name>:<hook>".
    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Rc::clone(log),
            }
        }

        fn record(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}:{}", self.name, hook));
        }
    }

    impl Object for Recorder {
        fn initialize(&mut self) {
            self.record("init");
        }

        fn update(&mut self, _dt: f64) {
            self.record("update");
        }

        fn fixed_update(&mut self, _dt: f64) {
            self.record("fixed");
        }

        fn shutdown(&mut self) {
            self.record("shutdown");
        }
    }

    fn engine_with(names: &[&'static str], log: &Log) -> Engine {
        let mut builder = Engine::builder();
        for &name in names {
            builder = builder.add_system(name, Recorder::new(name, log));
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_lifecycle_order() {
        let log = Log::default();
        let mut engine = engine_with(&["input", "physics", "audio"], &log);

        engine.initialize().unwrap();
        engine.update(0.016).unwrap();
        engine.stop();

        assert_eq!(
            *log.borrow(),
            [
                "input:init",
                "physics:init",
                "audio:init",
                "input:update",
                "physics:update",
                "audio:update",
                "audio:shutdown",
                "physics:shutdown",
                "input:shutdown",
            ]
        );
    }

    #[test]
    fn test_update_is_a_single_dispatch() {
        let log = Log::default();
        let mut engine = engine_with(&["only"], &log);
        engine.initialize().unwrap();
        log.borrow_mut().clear();

        engine.update(0.5).unwrap();
        engine.fixed_update(0.02).unwrap();

        assert_eq!(*log.borrow(), ["only:update", "only:fixed"]);
    }

    #[test]
    fn test_running_state_errors() {
        let mut engine = Engine::new();
        assert!(!engine.is_running());
        assert_eq!(engine.update(0.1), Err(EngineError::NotRunning));
        assert_eq!(engine.fixed_update(0.1), Err(EngineError::NotRunning));

        engine.initialize().unwrap();
        assert!(engine.is_running());
        assert_eq!(engine.initialize(), Err(EngineError::AlreadyRunning));

        engine.stop();
        assert!(!engine.is_running());
        assert_eq!(engine.update(0.1), Err(EngineError::NotRunning));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let log = Log::default();
        let mut engine = engine_with(&["a"], &log);

        engine.stop();
        assert!(log.borrow().is_empty());

        engine.initialize().unwrap();
        engine.stop();
        engine.stop();
        assert_eq!(*log.borrow(), ["a:init", "a:shutdown"]);
    }

    #[test]
    fn test_drop_stops_running_engine() {
        let log = Log::default();
        {
            let mut engine = engine_with(&["a", "b"], &log);
            engine.initialize().unwrap();
        }
        assert_eq!(*log.borrow(), ["a:init", "b:init", "b:shutdown", "a:shutdown"]);
    }

    #[test]
    fn test_systems_are_root_children() {
        let log = Log::default();
        let mut engine = engine_with(&["input", "physics"], &log);
        let audio = engine.add_system("audio", Recorder::new("audio", &log)).unwrap();

        let root = engine.root_node().unwrap();
        assert_eq!(root.name(), "Engine");
        assert_eq!(root.len(), 3);
        assert_eq!(root.at(2).unwrap().id(), audio);
        assert_eq!(engine.system("audio").unwrap().parent().unwrap().id(), engine.root());
        assert_eq!(engine.system_names().unwrap(), ["input", "physics", "audio"]);
    }

    #[test]
    fn test_missing_system_is_reported() {
        let mut engine = Engine::new();
        let expected = EngineError::Scene(SceneError::NodeNotFound {
            name: "renderer".to_string(),
        });

        assert_eq!(engine.system("renderer").err(), Some(expected.clone()));
        assert_eq!(engine.system_mut("renderer").err(), Some(expected.clone()));
        assert_eq!(engine.remove_system("renderer"), Err(expected));
    }

    #[test]
    fn test_remove_system_shuts_it_down() {
        let log = Log::default();
        let mut engine = engine_with(&["a", "b"], &log);
        let root = engine.root();
        engine.tree_mut().spawn_child(root, Node::new("plain")).unwrap();
        engine.initialize().unwrap();
        log.borrow_mut().clear();

        assert_eq!(engine.remove_system("a"), Ok(1));
        engine.update(0.1).unwrap();

        // Nodes without an object are skipped by dispatch
        assert_eq!(*log.borrow(), ["a:shutdown", "b:update"]);
        assert_eq!(engine.system_names().unwrap(), ["b", "plain"]);
    }

    #[test]
    fn test_root_cannot_be_moved_or_despawned() {
        let log = Log::default();
        let mut engine = engine_with(&["a"], &log);
        let root = engine.root();
        let other = engine.tree_mut().create("Other");

        assert_eq!(
            engine.tree_mut().add_child(other, root),
            Err(SceneError::PinnedRoot(root))
        );
        assert_eq!(engine.tree_mut().despawn(root), Err(SceneError::PinnedRoot(root)));
        engine.tree_mut().despawn(other).unwrap();

        assert!(engine.root_node().unwrap().is_root());
        engine.initialize().unwrap();
        assert_eq!(*log.borrow(), ["a:init"]);
    }

    #[test]
    fn test_config_names_root() {
        let engine = Engine::with_config(Config::default().with_name("World"));
        assert_eq!(engine.root_node().unwrap().name(), "World");
        assert_eq!(engine.config().name, "World");
        assert!(engine.root_node().unwrap().is_root());
    }
}
