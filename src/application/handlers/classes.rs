//! Admin class-management handlers: list, ensure, delete.
//!
//! Thin wrappers over [`WalletClassManager`] so the HTTP surface stays
//! DTO-only. Delete exists to give callers an honest error rather than a
//! silent no-op.

use serde_json::Value;

use crate::application::class_manager::WalletClassManager;
use crate::domain::errors::IssuanceError;
use crate::domain::wallet::WalletClass;

#[derive(Debug, Clone)]
pub struct EnsureClassCommand {
    pub class_id: String,
    pub template: Value,
}

pub struct EnsureClassHandler<'a> {
    manager: &'a WalletClassManager,
}

impl<'a> EnsureClassHandler<'a> {
    pub fn new(manager: &'a WalletClassManager) -> Self {
        Self { manager }
    }

    pub async fn handle(&self, command: EnsureClassCommand) -> Result<WalletClass, IssuanceError> {
        if command.class_id.trim().is_empty() {
            return Err(IssuanceError::validation("id", "must not be empty"));
        }
        if !command.template.is_object() {
            return Err(IssuanceError::validation("json", "template must be a JSON object"));
        }
        self.manager
            .ensure_class(&command.class_id, command.template)
            .await
    }
}

pub struct ListClassesHandler<'a> {
    manager: &'a WalletClassManager,
    issuer_id: &'a str,
}

impl<'a> ListClassesHandler<'a> {
    pub fn new(manager: &'a WalletClassManager, issuer_id: &'a str) -> Self {
        Self { manager, issuer_id }
    }

    pub async fn handle(&self) -> Result<Value, IssuanceError> {
        self.manager.list_classes(self.issuer_id).await
    }
}

pub struct DeleteClassHandler<'a> {
    manager: &'a WalletClassManager,
}

impl<'a> DeleteClassHandler<'a> {
    pub fn new(manager: &'a WalletClassManager) -> Self {
        Self { manager }
    }

    pub async fn handle(&self, class_id: &str) -> Result<(), IssuanceError> {
        if class_id.trim().is_empty() {
            return Err(IssuanceError::validation("id", "must not be empty"));
        }
        self.manager.delete_class(class_id).await
    }
}
