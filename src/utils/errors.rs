// src/utils/errors.rs
//! Error types for the interception layer
//!
//! A deliberately small taxonomy: the engine owns all network-level failure
//! handling, so this layer only distinguishes configuration problems from
//! engine-side rejections. "Already started" is not an error anywhere in this
//! crate; redundant startup is a supported no-op.

use thiserror::Error;

/// Errors surfaced by the interception layer
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration could not be loaded or parsed
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The engine refused a setting (e.g. a malformed experimental payload)
    #[error("engine rejected configuration: {0}")]
    ConfigRejected(String),

    /// The engine failed to start or register as the active transport
    #[error("engine failure: {0}")]
    EngineFailure(String),

    /// Observability setup failed
    #[error("observability error: {0}")]
    ObservabilityError(String),
}

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, EngineError>;
