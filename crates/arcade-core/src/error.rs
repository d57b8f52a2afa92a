//! Error types for arcade-core

/// Result type for arcade-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the orchestration layer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] arcade_fs::Error),

    #[error(transparent)]
    Sync(#[from] arcade_sync::Error),

    /// Realization was attempted while required archives are unavailable.
    ///
    /// Planning reports the missing set as a normal result; this error only
    /// fires when a caller skips that check.
    #[error("Missing required archives: {}", names.join(", "))]
    MissingDependency { names: Vec<String> },
}
