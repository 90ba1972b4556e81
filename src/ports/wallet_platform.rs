//! Wallet platform client port.
//!
//! Raw class CRUD against the mandatory wallet platform. The
//! create-then-update protocol lives in the application layer's
//! `WalletClassManager`; this port only reports the platform's responses,
//! with the class-exists conflict distinguished so the manager can fall
//! back to an update.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from wallet platform calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletPlatformError {
    /// The class already exists (HTTP 409 on insert).
    #[error("class already exists")]
    Conflict,

    /// The addressed resource does not exist.
    #[error("class not found")]
    NotFound,

    /// Credentials were rejected by the platform.
    #[error("platform authentication failed: {0}")]
    Auth(String),

    /// Any other non-success response.
    #[error("platform request failed (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// The request never reached the platform.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Port for the wallet platform's class registry.
#[async_trait]
pub trait WalletPlatformClient: Send + Sync {
    /// Creates a class from a template body carrying its own `id`.
    ///
    /// # Errors
    ///
    /// `Conflict` when a class with that id already exists.
    async fn insert_class(&self, template: &Value) -> Result<Value, WalletPlatformError>;

    /// Replaces an existing class wholesale, addressed by id.
    async fn update_class(
        &self,
        class_id: &str,
        template: &Value,
    ) -> Result<Value, WalletPlatformError>;

    /// Fetches a class by id. Returns `Ok(None)` when the platform reports
    /// it does not exist.
    async fn get_class(&self, class_id: &str) -> Result<Option<Value>, WalletPlatformError>;

    /// Lists all classes registered under an issuer.
    async fn list_classes(&self, issuer_id: &str) -> Result<Value, WalletPlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_platform_client_is_object_safe() {
        fn _accepts_dyn(_client: &dyn WalletPlatformClient) {}
    }
}
