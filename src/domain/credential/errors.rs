//! Credential-path error types.

use thiserror::Error;

/// Errors raised while hashing or verifying member credentials.
///
/// A key-derivation failure is the only fatal case; absent rosters and
/// unreadable entries are handled inside the verifier and never surface here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The key-derivation function rejected its parameters or output buffer.
    #[error("key derivation failed: {0}")]
    Kdf(String),
}
