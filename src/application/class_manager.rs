//! Idempotent wallet class lifecycle management.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::errors::{IssuanceError, Platform};
use crate::domain::wallet::{with_class_id, WalletClass};
use crate::ports::{WalletPlatformClient, WalletPlatformError};

/// Drives the create-then-update protocol for per-club class templates.
///
/// One class backs many issued objects; calling [`ensure_class`] any number
/// of times with the same id leaves exactly one class on the platform,
/// reflecting the latest template body.
///
/// [`ensure_class`]: WalletClassManager::ensure_class
pub struct WalletClassManager {
    client: Arc<dyn WalletPlatformClient>,
}

impl WalletClassManager {
    pub fn new(client: Arc<dyn WalletPlatformClient>) -> Self {
        Self { client }
    }

    /// Creates the class, or replaces it in full when the platform reports
    /// it already exists. The template's `id` is forced to `class_id`
    /// before sending.
    ///
    /// # Errors
    ///
    /// Any platform response other than success or exists-conflict is a
    /// fatal upstream error.
    pub async fn ensure_class(
        &self,
        class_id: &str,
        template: Value,
    ) -> Result<WalletClass, IssuanceError> {
        let template = with_class_id(template, class_id);

        match self.client.insert_class(&template).await {
            Ok(body) => {
                tracing::info!(class_id, "wallet class created");
                Ok(WalletClass {
                    id: class_id.to_string(),
                    body,
                })
            }
            Err(WalletPlatformError::Conflict) => {
                tracing::info!(class_id, "wallet class exists, updating");
                let body = self
                    .client
                    .update_class(class_id, &template)
                    .await
                    .map_err(upstream)?;
                Ok(WalletClass {
                    id: class_id.to_string(),
                    body,
                })
            }
            Err(e) => Err(upstream(e)),
        }
    }

    /// Read-only lookup; a platform 404 is `Ok(None)`, not an error.
    pub async fn get_class(&self, class_id: &str) -> Result<Option<Value>, IssuanceError> {
        self.client.get_class(class_id).await.map_err(upstream)
    }

    /// Lists every class registered under the issuer.
    pub async fn list_classes(&self, issuer_id: &str) -> Result<Value, IssuanceError> {
        self.client.list_classes(issuer_id).await.map_err(upstream)
    }

    /// Always fails: the platform offers no class deletion primitive, and a
    /// silent no-op would mislead callers into believing state changed.
    pub async fn delete_class(&self, class_id: &str) -> Result<(), IssuanceError> {
        tracing::warn!(class_id, "class deletion attempted");
        Err(IssuanceError::Unsupported(
            "the wallet platform does not support deleting classes; archive the class or reuse its id"
                .to_string(),
        ))
    }
}

fn upstream(e: WalletPlatformError) -> IssuanceError {
    IssuanceError::upstream(Platform::GoogleWallet, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory platform registry that reports conflicts like the real one.
    struct FakePlatform {
        classes: Mutex<HashMap<String, Value>>,
        fail_insert: bool,
    }

    impl FakePlatform {
        fn new() -> Self {
            Self {
                classes: Mutex::new(HashMap::new()),
                fail_insert: false,
            }
        }

        fn failing() -> Self {
            Self {
                classes: Mutex::new(HashMap::new()),
                fail_insert: true,
            }
        }

        fn class_count(&self) -> usize {
            self.classes.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl WalletPlatformClient for FakePlatform {
        async fn insert_class(&self, template: &Value) -> Result<Value, WalletPlatformError> {
            if self.fail_insert {
                return Err(WalletPlatformError::Upstream {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            let id = template["id"].as_str().unwrap().to_string();
            let mut classes = self.classes.lock().unwrap();
            if classes.contains_key(&id) {
                return Err(WalletPlatformError::Conflict);
            }
            classes.insert(id, template.clone());
            Ok(template.clone())
        }

        async fn update_class(
            &self,
            class_id: &str,
            template: &Value,
        ) -> Result<Value, WalletPlatformError> {
            let mut classes = self.classes.lock().unwrap();
            if !classes.contains_key(class_id) {
                return Err(WalletPlatformError::NotFound);
            }
            classes.insert(class_id.to_string(), template.clone());
            Ok(template.clone())
        }

        async fn get_class(&self, class_id: &str) -> Result<Option<Value>, WalletPlatformError> {
            Ok(self.classes.lock().unwrap().get(class_id).cloned())
        }

        async fn list_classes(&self, _issuer_id: &str) -> Result<Value, WalletPlatformError> {
            let classes: Vec<Value> = self.classes.lock().unwrap().values().cloned().collect();
            Ok(json!({ "resources": classes }))
        }
    }

    const CLASS_ID: &str = "338800.club-pass-v1";

    #[tokio::test]
    async fn first_ensure_creates() {
        let platform = Arc::new(FakePlatform::new());
        let manager = WalletClassManager::new(platform.clone());

        let class = manager
            .ensure_class(CLASS_ID, json!({"reviewStatus": "UNDER_REVIEW"}))
            .await
            .unwrap();

        assert_eq!(class.id, CLASS_ID);
        assert_eq!(platform.class_count(), 1);
    }

    #[tokio::test]
    async fn second_ensure_updates_instead_of_duplicating() {
        let platform = Arc::new(FakePlatform::new());
        let manager = WalletClassManager::new(platform.clone());

        manager
            .ensure_class(CLASS_ID, json!({"version": 1}))
            .await
            .unwrap();
        manager
            .ensure_class(CLASS_ID, json!({"version": 2}))
            .await
            .unwrap();

        assert_eq!(platform.class_count(), 1);
        let stored = platform.get_class(CLASS_ID).await.unwrap().unwrap();
        // The second body won.
        assert_eq!(stored["version"], 2);
    }

    #[tokio::test]
    async fn ensure_forces_template_id() {
        let platform = Arc::new(FakePlatform::new());
        let manager = WalletClassManager::new(platform.clone());

        manager
            .ensure_class(CLASS_ID, json!({"id": "something.else"}))
            .await
            .unwrap();

        let stored = platform.get_class(CLASS_ID).await.unwrap().unwrap();
        assert_eq!(stored["id"], CLASS_ID);
    }

    #[tokio::test]
    async fn other_platform_failures_are_fatal() {
        let manager = WalletClassManager::new(Arc::new(FakePlatform::failing()));

        let result = manager.ensure_class(CLASS_ID, json!({})).await;
        assert!(matches!(result, Err(IssuanceError::Upstream { .. })));
    }

    #[tokio::test]
    async fn get_missing_class_is_none() {
        let manager = WalletClassManager::new(Arc::new(FakePlatform::new()));
        let result = manager.get_class("338800.nope").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_is_always_unsupported() {
        let platform = Arc::new(FakePlatform::new());
        let manager = WalletClassManager::new(platform.clone());
        manager.ensure_class(CLASS_ID, json!({})).await.unwrap();

        let result = manager.delete_class(CLASS_ID).await;
        assert!(matches!(result, Err(IssuanceError::Unsupported(_))));
        // And nothing was touched.
        assert_eq!(platform.class_count(), 1);
    }
}
