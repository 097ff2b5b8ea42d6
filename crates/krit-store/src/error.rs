//! Error types for krit-store.

use std::path::PathBuf;

use krit_core::errors::CoreError;
use thiserror::Error;

/// Errors from project layout, source extraction and audit persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The project directory does not exist under the projects root.
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// The bidder has no directory inside the project.
    #[error("Bidder not found: {bidder} (project {project})")]
    BidderNotFound { project: String, bidder: String },

    /// The criteria document has neither known shape.
    #[error("Malformed criteria document {}: {reason}", path.display())]
    MalformedSource { path: PathBuf, reason: String },

    /// Reading or writing a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing an audit document failed.
    #[error("Failed to serialize audit document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Validation or lookup failure from krit-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
