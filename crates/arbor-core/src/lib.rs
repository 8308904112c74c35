//! Arbor Core
//!
//! This crate contains the shared plumbing for the Arbor engine: generational
//! storage, logging setup, profiling hooks and engine configuration.

pub mod alloc;
pub mod config;
pub mod logging;
pub mod profiling;

pub use config::{Config, ProfilingMode};
