//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid wallet issuer id (must be numeric)")]
    InvalidIssuerId,

    #[error("Invalid service account email")]
    InvalidServiceAccountEmail,

    #[error("Service account key is not PEM-encoded")]
    InvalidServiceAccountKey,

    #[error("Apple Wallet configuration is incomplete: {0}")]
    IncompleteAppleConfig(&'static str),

    #[error("Invalid storage backend (expected 'filesystem' or 'bucket')")]
    InvalidStorageBackend,

    #[error("Bucket storage requires a base URL and service key")]
    IncompleteBucketConfig,
}
