//! Engine-wide error taxonomy for pass issuance.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | Verification | 403 |
//! | Configuration | 500 |
//! | Upstream | 502 |
//! | Unsupported | 405 |

use thiserror::Error;

/// The external system an upstream failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    GoogleWallet,
    AppleWallet,
    RosterStorage,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::GoogleWallet => write!(f, "google-wallet"),
            Platform::AppleWallet => write!(f, "apple-wallet"),
            Platform::RosterStorage => write!(f, "roster-storage"),
        }
    }
}

/// Errors surfaced by the issuance engine.
///
/// Verification failures deliberately carry no detail: a missing roster, an
/// unknown club, and a hash mismatch all collapse into the same variant so a
/// caller cannot probe which clubs exist or which rosters are loaded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssuanceError {
    /// A request field is missing or malformed.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// The claim could not be verified against the roster.
    #[error("Verification failed. Invalid name or card number.")]
    Verification,

    /// Required credentials for the mandatory platform are missing or unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An external platform call failed unexpectedly.
    #[error("Upstream failure ({platform}): {message}")]
    Upstream { platform: Platform, message: String },

    /// The operation is not offered by the platform.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl IssuanceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        IssuanceError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        IssuanceError::Configuration(message.into())
    }

    pub fn upstream(platform: Platform, message: impl Into<String>) -> Self {
        IssuanceError::Upstream {
            platform,
            message: message.into(),
        }
    }
}
