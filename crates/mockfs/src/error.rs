// File: src/error.rs
// Purpose: Error types for discovery, module loading and handler invocation

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout mockfs
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while resolving routes or serving a request
#[derive(Debug, Error)]
pub enum Error {
    /// Walking a scan directory failed (unreadable directory, broken symlink loop, ...)
    #[error("failed to scan {}: {source}", dir.display())]
    Discovery {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A scan pattern or ignore glob does not compile
    #[error("invalid glob pattern `{pattern}`: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The configured method suffix regex does not compile
    #[error("invalid method suffix regex `{pattern}`: {source}")]
    InvalidSuffixRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A directory scan task panicked or was cancelled
    #[error("scan task failed: {0}")]
    ScanTask(#[from] tokio::task::JoinError),

    /// Loading the handler module failed at invocation time
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The handler itself failed
    #[error(transparent)]
    Handler(anyhow::Error),
}

/// Errors raised by a [`crate::ModuleLoader`]
#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing is registered at this location
    #[error("no handler module at {}", .0.display())]
    NotFound(PathBuf),

    /// The module's initialiser failed
    #[error("handler module {} failed to initialise: {source}", location.display())]
    Evaluation {
        location: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The module loaded but exports no default handler
    #[error("handler module {} has no default export", .0.display())]
    MissingDefaultExport(PathBuf),
}
