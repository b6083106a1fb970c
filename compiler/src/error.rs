//! Error types for dispatch tree assembly.

use thiserror::Error;

/// Errors raised while registering commands with the tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Strict mode rejected a second command with the same top-level name.
    #[error("duplicate command registration: {0}")]
    DuplicateCommand(String),

    /// Loading the manifest failed.
    #[error("manifest error: {0}")]
    Manifest(String),
}

impl From<signature_core::ManifestError> for BuildError {
    fn from(err: signature_core::ManifestError) -> Self {
        Self::Manifest(err.to_string())
    }
}

/// Convenience alias for results with [`BuildError`].
pub type Result<T> = std::result::Result<T, BuildError>;
