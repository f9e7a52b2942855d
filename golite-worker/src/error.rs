use std::path::PathBuf;

use golite_engine::GoError;

#[derive(Debug)]
pub enum WorkerError {
    Engine(GoError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Stream(std::io::Error),
    Json(serde_json::Error),
    BadCommand(String),
    Config(String),
}

impl std::fmt::Display for WorkerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerError::Engine(e) => write!(f, "Engine error: {e}"),
            WorkerError::Io { path, source } => {
                write!(f, "I/O error at {}: {source}", path.display())
            }
            WorkerError::Stream(e) => write!(f, "Stream error: {e}"),
            WorkerError::Json(e) => write!(f, "JSON error: {e}"),
            WorkerError::BadCommand(msg) => write!(f, "Bad command: {msg}"),
            WorkerError::Config(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for WorkerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkerError::Engine(e) => Some(e),
            WorkerError::Io { source, .. } => Some(source),
            WorkerError::Stream(e) => Some(e),
            WorkerError::Json(e) => Some(e),
            WorkerError::BadCommand(_) | WorkerError::Config(_) => None,
        }
    }
}

impl From<GoError> for WorkerError {
    fn from(e: GoError) -> Self {
        WorkerError::Engine(e)
    }
}

impl From<serde_json::Error> for WorkerError {
    fn from(e: serde_json::Error) -> Self {
        WorkerError::Json(e)
    }
}

impl WorkerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WorkerError::Io {
            path: path.into(),
            source,
        }
    }
}
