//! Cross-cutting error types for krit.
//!
//! Storage and configuration errors live in their own crates. Everything
//! converges into `anyhow` in `krit-cli`.

use thiserror::Error;

/// Errors that can be raised by any krit crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (names, formats, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
