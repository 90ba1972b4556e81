//! IssuePassHandler - the pass issuance orchestrator.
//!
//! One instance serves all requests but holds no per-request state; each
//! call walks the same stages:
//!
//! `validate -> verify -> ensure class -> google object -> apple (optional)`
//!
//! Google issuance is the baseline guarantee: a failure there aborts the
//! request. The Apple stage never does; its outcome is reported explicitly
//! as generated, skipped, or failed.

use std::sync::Arc;

use crate::application::class_manager::WalletClassManager;
use crate::domain::club::{ClubDefinition, ClubRegistry};
use crate::domain::credential::CredentialVerifier;
use crate::domain::errors::IssuanceError;
use crate::domain::pass::PassData;
use crate::domain::wallet::{build_class_template, build_generic_object, SaveUrlSigner};
use crate::ports::ApplePassGenerator;

/// A claim submitted by a caller requesting a pass.
#[derive(Debug, Clone)]
pub struct IssuePassCommand {
    pub first_name: String,
    pub last_name: String,
    pub identifier: String,
    pub club_id: String,
}

/// Outcome of the optional Apple stage, reported rather than swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplePassOutcome {
    /// Signed archive bytes, ready to download.
    Generated(Vec<u8>),
    /// The platform is not configured; nothing was attempted.
    Skipped(String),
    /// Generation was attempted and failed; the request still succeeds.
    Failed(String),
}

impl ApplePassOutcome {
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            ApplePassOutcome::Generated(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// Issuance response assembled for the caller.
#[derive(Debug, Clone)]
pub struct IssuePassResult {
    pub google_save_url: String,
    pub apple_pass: ApplePassOutcome,
    pub member_id: String,
}

/// Orchestrates verification and dual-platform generation.
pub struct IssuePassHandler {
    registry: Arc<ClubRegistry>,
    verifier: CredentialVerifier,
    class_manager: WalletClassManager,
    save_signer: Arc<SaveUrlSigner>,
    issuer_id: String,
    apple_generator: Option<Arc<dyn ApplePassGenerator>>,
}

impl IssuePassHandler {
    pub fn new(
        registry: Arc<ClubRegistry>,
        verifier: CredentialVerifier,
        class_manager: WalletClassManager,
        save_signer: Arc<SaveUrlSigner>,
        issuer_id: impl Into<String>,
        apple_generator: Option<Arc<dyn ApplePassGenerator>>,
    ) -> Self {
        Self {
            registry,
            verifier,
            class_manager,
            save_signer,
            issuer_id: issuer_id.into(),
            apple_generator,
        }
    }

    pub async fn handle(&self, command: IssuePassCommand) -> Result<IssuePassResult, IssuanceError> {
        self.validate(&command)?;

        // Unknown clubs collapse into the same uniform rejection as a hash
        // mismatch so callers cannot enumerate club ids.
        let club = match self.registry.get(&command.club_id) {
            Some(club) => club,
            None => {
                tracing::warn!(club_id = %command.club_id, "claim for unknown club");
                return Err(IssuanceError::Verification);
            }
        };

        let verification_name = club.format_name(&command.first_name, &command.last_name);
        let verified = self
            .verifier
            .verify(&verification_name, &command.identifier, &club.id)
            .await
            .map_err(|e| IssuanceError::configuration(e.to_string()))?;

        if !verified {
            tracing::info!(club_id = %club.id, "verification rejected");
            return Err(IssuanceError::Verification);
        }

        let display_name = format!(
            "{} {}",
            command.first_name.trim(),
            command.last_name.trim()
        );
        let pass = PassData::new(display_name, command.identifier.trim(), club.id.clone());
        tracing::info!(club_id = %club.id, member_id = %pass.member_id, "identity verified, issuing pass");

        // Mandatory platform: class first, then the signed save URL.
        let class_id = club.class_id(&self.issuer_id);
        let template = build_class_template(club, &self.issuer_id);
        self.class_manager.ensure_class(&class_id, template).await?;

        let object = build_generic_object(&pass, club, &self.issuer_id);
        let google_save_url = self.save_signer.save_url(object)?;

        let apple_pass = self.generate_apple(&pass, club).await;

        Ok(IssuePassResult {
            google_save_url,
            apple_pass,
            member_id: pass.member_id,
        })
    }

    fn validate(&self, command: &IssuePassCommand) -> Result<(), IssuanceError> {
        for (field, value) in [
            ("first_name", &command.first_name),
            ("last_name", &command.last_name),
            ("card_number", &command.identifier),
            ("club", &command.club_id),
        ] {
            if value.trim().is_empty() {
                return Err(IssuanceError::validation(field, "must not be empty"));
            }
        }
        Ok(())
    }

    /// Apple-side problems never block Google-side success.
    async fn generate_apple(&self, pass: &PassData, club: &ClubDefinition) -> ApplePassOutcome {
        let generator = match &self.apple_generator {
            Some(generator) => generator,
            None => {
                tracing::debug!("apple wallet not configured, skipping");
                return ApplePassOutcome::Skipped("apple wallet not configured".to_string());
            }
        };

        match generator.generate(pass, club).await {
            Ok(bytes) => ApplePassOutcome::Generated(bytes),
            Err(e) => {
                tracing::error!(error = %e, member_id = %pass.member_id, "apple pass generation failed");
                ApplePassOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::club::RosterColumns;
    use crate::domain::credential::{RosterEntry, RosterHasher};
    use crate::ports::{
        PassBuildError, RosterStore, RosterStoreError, WalletPlatformClient, WalletPlatformError,
    };
    use async_trait::async_trait;
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════
    // Fakes
    // ════════════════════════════════════════════════════════════════════════

    struct InMemoryRosterStore {
        rosters: Mutex<HashMap<String, Vec<RosterEntry>>>,
    }

    impl InMemoryRosterStore {
        fn with_member(club_id: &str, name: &str, identifier: &str) -> Self {
            let entry = RosterHasher::hash(name, identifier, club_id).unwrap();
            let mut rosters = HashMap::new();
            rosters.insert(club_id.to_string(), vec![entry]);
            Self {
                rosters: Mutex::new(rosters),
            }
        }
    }

    #[async_trait]
    impl RosterStore for InMemoryRosterStore {
        async fn fetch_roster(&self, club_id: &str) -> Result<Vec<RosterEntry>, RosterStoreError> {
            self.rosters
                .lock()
                .unwrap()
                .get(club_id)
                .cloned()
                .ok_or_else(|| RosterStoreError::NotFound(club_id.to_string()))
        }

        async fn store_roster(
            &self,
            club_id: &str,
            entries: &[RosterEntry],
        ) -> Result<(), RosterStoreError> {
            self.rosters
                .lock()
                .unwrap()
                .insert(club_id.to_string(), entries.to_vec());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakePlatform {
        classes: Mutex<HashMap<String, Value>>,
        fail_insert: bool,
    }

    #[async_trait]
    impl WalletPlatformClient for FakePlatform {
        async fn insert_class(&self, template: &Value) -> Result<Value, WalletPlatformError> {
            if self.fail_insert {
                return Err(WalletPlatformError::Upstream {
                    status: 500,
                    message: "boom".to_string(),
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
            self.classes
                .lock()
                .unwrap()
                .insert(class_id.to_string(), template.clone());
            Ok(template.clone())
        }

        async fn get_class(&self, class_id: &str) -> Result<Option<Value>, WalletPlatformError> {
            Ok(self.classes.lock().unwrap().get(class_id).cloned())
        }

        async fn list_classes(&self, _issuer_id: &str) -> Result<Value, WalletPlatformError> {
            Ok(json!({"resources": []}))
        }
    }

    struct StubAppleGenerator {
        fail: bool,
    }

    #[async_trait]
    impl ApplePassGenerator for StubAppleGenerator {
        async fn generate(
            &self,
            pass: &PassData,
            _club: &ClubDefinition,
        ) -> Result<Vec<u8>, PassBuildError> {
            if self.fail {
                return Err(PassBuildError::Signing("bad certificate".to_string()));
            }
            Ok(format!("pkpass:{}", pass.member_id).into_bytes())
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════

    const CLUB: &str = "data-science-student-society";
    const ISSUER: &str = "338800";

    fn test_registry() -> Arc<ClubRegistry> {
        Arc::new(
            ClubRegistry::new(vec![ClubDefinition {
                id: CLUB.to_string(),
                display_name: "Data Science Student Society".to_string(),
                class_suffix: "club-pass-v1".to_string(),
                logo_url: None,
                hero_image_url: None,
                name_format: "{last}, {first}".to_string(),
                benefits: vec![],
                roster_columns: RosterColumns::default(),
            }])
            .unwrap(),
        )
    }

    fn test_signer() -> Arc<SaveUrlSigner> {
        let pem = String::from_utf8(
            openssl::rsa::Rsa::generate(2048)
                .unwrap()
                .private_key_to_pem()
                .unwrap(),
        )
        .unwrap();
        Arc::new(
            SaveUrlSigner::new(
                "svc@example.iam.gserviceaccount.com",
                &SecretString::new(pem),
                vec![],
            )
            .unwrap(),
        )
    }

    fn handler_with(
        platform: Arc<FakePlatform>,
        apple: Option<Arc<dyn ApplePassGenerator>>,
    ) -> IssuePassHandler {
        let store = Arc::new(InMemoryRosterStore::with_member(CLUB, "doe, john", "12345678"));
        IssuePassHandler::new(
            test_registry(),
            CredentialVerifier::new(store),
            WalletClassManager::new(platform),
            test_signer(),
            ISSUER,
            apple,
        )
    }

    fn valid_command() -> IssuePassCommand {
        IssuePassCommand {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            identifier: "12345678".to_string(),
            club_id: CLUB.to_string(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Success Path
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn verified_member_receives_google_url() {
        let handler = handler_with(Arc::new(FakePlatform::default()), None);

        let result = handler.handle(valid_command()).await.unwrap();

        assert!(result.google_save_url.starts_with("https://pay.google.com/gp/v/save/"));
        assert!(uuid::Uuid::parse_str(&result.member_id).is_ok());
    }

    #[tokio::test]
    async fn member_ids_differ_across_repeat_requests() {
        let handler = handler_with(Arc::new(FakePlatform::default()), None);

        let first = handler.handle(valid_command()).await.unwrap();
        let second = handler.handle(valid_command()).await.unwrap();

        assert_ne!(first.member_id, second.member_id);
    }

    #[tokio::test]
    async fn repeat_issuance_keeps_single_class() {
        let platform = Arc::new(FakePlatform::default());
        let handler = handler_with(platform.clone(), None);

        handler.handle(valid_command()).await.unwrap();
        handler.handle(valid_command()).await.unwrap();

        assert_eq!(platform.classes.lock().unwrap().len(), 1);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Rejection Paths
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn wrong_identifier_is_rejected_uniformly() {
        let handler = handler_with(Arc::new(FakePlatform::default()), None);
        let mut command = valid_command();
        command.identifier = "12345679".to_string();

        let result = handler.handle(command).await;
        assert_eq!(result.unwrap_err(), IssuanceError::Verification);
    }

    #[tokio::test]
    async fn unknown_club_is_rejected_uniformly() {
        let handler = handler_with(Arc::new(FakePlatform::default()), None);
        let mut command = valid_command();
        command.club_id = "no-such-club".to_string();

        let result = handler.handle(command).await;
        // Indistinguishable from a hash mismatch.
        assert_eq!(result.unwrap_err(), IssuanceError::Verification);
    }

    #[tokio::test]
    async fn empty_fields_are_validation_errors() {
        let handler = handler_with(Arc::new(FakePlatform::default()), None);
        let mut command = valid_command();
        command.first_name = "  ".to_string();

        let result = handler.handle(command).await;
        assert!(matches!(result, Err(IssuanceError::Validation { .. })));
    }

    #[tokio::test]
    async fn mandatory_platform_failure_aborts() {
        let platform = Arc::new(FakePlatform {
            classes: Mutex::new(HashMap::new()),
            fail_insert: true,
        });
        let handler = handler_with(platform, None);

        let result = handler.handle(valid_command()).await;
        assert!(matches!(result, Err(IssuanceError::Upstream { .. })));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Apple Degradation Policy
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn apple_skipped_when_not_configured() {
        let handler = handler_with(Arc::new(FakePlatform::default()), None);

        let result = handler.handle(valid_command()).await.unwrap();
        assert!(matches!(result.apple_pass, ApplePassOutcome::Skipped(_)));
        assert!(result.apple_pass.bytes().is_none());
    }

    #[tokio::test]
    async fn apple_generated_when_configured() {
        let handler = handler_with(
            Arc::new(FakePlatform::default()),
            Some(Arc::new(StubAppleGenerator { fail: false })),
        );

        let result = handler.handle(valid_command()).await.unwrap();
        assert!(matches!(result.apple_pass, ApplePassOutcome::Generated(_)));
    }

    #[tokio::test]
    async fn apple_failure_degrades_instead_of_aborting() {
        let handler = handler_with(
            Arc::new(FakePlatform::default()),
            Some(Arc::new(StubAppleGenerator { fail: true })),
        );

        let result = handler.handle(valid_command()).await.unwrap();
        // Google artifact still present, overall success.
        assert!(result.google_save_url.starts_with("https://pay.google.com/"));
        assert!(matches!(result.apple_pass, ApplePassOutcome::Failed(_)));
    }
}
