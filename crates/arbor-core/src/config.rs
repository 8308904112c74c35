use crate::logging::DEFAULT_FILTER;

/// Configurations for the Arbor engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name given to the engine's root node.
    pub name: String,
    pub profiling: ProfilingMode,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: "Engine".to_string(),
            profiling: ProfilingMode::Off,
            log_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_profiling(mut self, profiling: ProfilingMode) -> Self {
        self.profiling = profiling;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling is disabled
    #[default]
    Off,
    /// Profiling scopes are recorded in-process
    On,
    /// Profiling scopes are recorded and served to external tools such as
    /// 'puffin_viewer'
    WithWebServer,
}
