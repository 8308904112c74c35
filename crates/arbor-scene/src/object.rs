//! Lifecycle hooks for behaviour attached to nodes.

/// Behaviour that can be attached to a [`Node`](crate::Node).
///
/// Every hook defaults to a no-op. Resources should be acquired on
/// construction and released on drop; `initialize`/`shutdown` are for state
/// that depends on sibling systems already existing.
///
/// # Example
///
/// ```
/// use arbor_scene::Object;
///
/// #[derive(Default)]
/// struct Clock {
///     elapsed: f64,
/// }
///
/// impl Object for Clock {
///     fn update(&mut self, dt: f64) {
///         self.elapsed += dt;
///     }
/// }
/// ```
pub trait Object: 'static {
    /// Called once before the first update.
    fn initialize(&mut self) {}

    /// Variable-step update; `dt` is the duration of the last frame in seconds.
    #[allow(unused_variables)]
    fn update(&mut self, dt: f64) {}

    /// Fixed-step update; may run several times per frame.
    #[allow(unused_variables)]
    fn fixed_update(&mut self, dt: f64) {}

    /// Called once when the owner stops.
    fn shutdown(&mut self) {}
}
