use std::path::PathBuf;
use thiserror::Error;

/// Failures hit while loading and parsing one Python source. A failed file
/// is skipped with a warning; it never aborts the run.
#[derive(Debug, Error)]
pub enum DocdriftError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl DocdriftError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The file the failure belongs to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
