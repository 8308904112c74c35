use std::fmt;

use arbor_scene::SceneError;

/// Errors reported by [`Engine`](crate::Engine) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A tree operation on the engine root or one of its systems failed.
    Scene(SceneError),
    /// `initialize` was called on an engine that is already running.
    AlreadyRunning,
    /// A per-tick dispatch was requested before `initialize`.
    NotRunning,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Scene(err) => write!(f, "Scene error: {}", err),
            EngineError::AlreadyRunning => write!(f, "Engine is already running"),
            EngineError::NotRunning => write!(f, "Engine is not running"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Scene(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SceneError> for EngineError {
    fn from(err: SceneError) -> Self {
        EngineError::Scene(err)
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
