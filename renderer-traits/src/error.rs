//! Error types shared by renderer adapters.

use thiserror::Error;

/// Errors surfaced by renderer adapters and their engines.
#[derive(Error, Debug)]
pub enum RendererError {
    /// The backend engine was never installed, or its loader disappeared.
    #[error("Renderer engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The engine factory failed to produce a player instance.
    #[error("Engine construction failed: {0}")]
    EngineCreation(String),

    /// A source URL or MIME type the adapter cannot work with.
    #[error("Invalid media source: {0}")]
    InvalidSource(String),

    /// Volume values must stay within `[0.0, 1.0]`.
    #[error("Invalid volume: {0} (must be between 0.0 and 1.0)")]
    InvalidVolume(f64),

    /// A malformed time code string.
    #[error("Time code must have the format `hh:mm:ss`: `{0}`")]
    InvalidTimeCode(String),

    /// Operation attempted on a destroyed adapter.
    #[error("Renderer adapter already destroyed")]
    Destroyed,

    /// The backend reported a failure while executing an operation.
    #[error("Backend operation failed: {0}")]
    Backend(String),

    /// Internal error (should not occur in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RendererError {
    /// Returns `true` if retrying the operation later can succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RendererError::EngineUnavailable(_) | RendererError::Backend(_)
        )
    }
}

/// Result type for renderer operations.
pub type Result<T> = std::result::Result<T, RendererError>;
