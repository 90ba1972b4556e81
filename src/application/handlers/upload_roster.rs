//! UploadRosterHandler - hashes parsed roster rows and overwrites the
//! club's stored blob.
//!
//! The CSV (or sheet) parsing happens in the caller; this handler receives
//! already-extracted (name, identifier) pairs. Plaintext never leaves this
//! function: only the derived hashes are persisted.

use std::sync::Arc;

use crate::domain::club::ClubRegistry;
use crate::domain::credential::{RosterEntry, RosterHasher};
use crate::domain::errors::{IssuanceError, Platform};
use crate::ports::RosterStore;

/// One parsed roster row as stored in the club's member sheet
/// (name already in the club's roster format, e.g. `"Doe, John"`).
#[derive(Debug, Clone)]
pub struct RosterRow {
    pub name: String,
    pub identifier: String,
}

#[derive(Debug, Clone)]
pub struct UploadRosterCommand {
    pub club_id: String,
    pub rows: Vec<RosterRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRosterResult {
    /// Number of entries written.
    pub count: usize,
}

pub struct UploadRosterHandler {
    registry: Arc<ClubRegistry>,
    store: Arc<dyn RosterStore>,
}

impl UploadRosterHandler {
    pub fn new(registry: Arc<ClubRegistry>, store: Arc<dyn RosterStore>) -> Self {
        Self { registry, store }
    }

    /// Hashes every non-empty row and replaces the club's roster.
    ///
    /// # Errors
    ///
    /// - `Validation` for an unknown club or when no usable rows remain
    /// - `Configuration` if the key derivation fails
    /// - `Upstream` if the storage write fails
    pub async fn handle(
        &self,
        command: UploadRosterCommand,
    ) -> Result<UploadRosterResult, IssuanceError> {
        let club = self
            .registry
            .get(&command.club_id)
            .ok_or_else(|| IssuanceError::validation("club", "unknown club id"))?;

        let mut entries: Vec<RosterEntry> = Vec::with_capacity(command.rows.len());
        for row in &command.rows {
            // Rows with a blank name or identifier are skipped, matching the
            // sheet-export reality of trailing empty lines.
            if row.name.trim().is_empty() || row.identifier.trim().is_empty() {
                continue;
            }
            let entry = RosterHasher::hash_async(
                row.name.clone(),
                row.identifier.clone(),
                club.id.clone(),
            )
            .await
            .map_err(|e| IssuanceError::configuration(e.to_string()))?;
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(IssuanceError::validation(
                "rows",
                format!(
                    "no valid records; expected '{}' and '{}' values",
                    club.roster_columns.name, club.roster_columns.identifier
                ),
            ));
        }

        self.store
            .store_roster(&club.id, &entries)
            .await
            .map_err(|e| IssuanceError::upstream(Platform::RosterStorage, e.to_string()))?;

        tracing::info!(club_id = %club.id, count = entries.len(), "roster replaced");

        Ok(UploadRosterResult {
            count: entries.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::club::{ClubDefinition, RosterColumns};
    use crate::ports::RosterStoreError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct InMemoryRosterStore {
        rosters: Mutex<HashMap<String, Vec<RosterEntry>>>,
    }

    impl InMemoryRosterStore {
        fn new() -> Self {
            Self {
                rosters: Mutex::new(HashMap::new()),
            }
        }

        fn roster(&self, club_id: &str) -> Option<Vec<RosterEntry>> {
            self.rosters.lock().unwrap().get(club_id).cloned()
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

    const CLUB: &str = "data-science-student-society";

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

    fn row(name: &str, identifier: &str) -> RosterRow {
        RosterRow {
            name: name.to_string(),
            identifier: identifier.to_string(),
        }
    }

    #[tokio::test]
    async fn hashes_and_stores_rows() {
        let store = Arc::new(InMemoryRosterStore::new());
        let handler = UploadRosterHandler::new(test_registry(), store.clone());

        let result = handler
            .handle(UploadRosterCommand {
                club_id: CLUB.to_string(),
                rows: vec![row("Doe, John", "12345678"), row("Smith, Jane", "87654321")],
            })
            .await
            .unwrap();

        assert_eq!(result.count, 2);
        let stored = store.roster(CLUB).unwrap();
        assert_eq!(stored[0], RosterHasher::hash("Doe, John", "12345678", CLUB).unwrap());
    }

    #[tokio::test]
    async fn blank_rows_are_skipped() {
        let store = Arc::new(InMemoryRosterStore::new());
        let handler = UploadRosterHandler::new(test_registry(), store.clone());

        let result = handler
            .handle(UploadRosterCommand {
                club_id: CLUB.to_string(),
                rows: vec![row("Doe, John", "12345678"), row("", ""), row("  ", "99")],
            })
            .await
            .unwrap();

        assert_eq!(result.count, 1);
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let handler = UploadRosterHandler::new(test_registry(), Arc::new(InMemoryRosterStore::new()));

        let result = handler
            .handle(UploadRosterCommand {
                club_id: CLUB.to_string(),
                rows: vec![row("", "")],
            })
            .await;

        assert!(matches!(result, Err(IssuanceError::Validation { .. })));
    }

    #[tokio::test]
    async fn unknown_club_is_rejected() {
        let handler = UploadRosterHandler::new(test_registry(), Arc::new(InMemoryRosterStore::new()));

        let result = handler
            .handle(UploadRosterCommand {
                club_id: "nope".to_string(),
                rows: vec![row("Doe, John", "12345678")],
            })
            .await;

        assert!(matches!(result, Err(IssuanceError::Validation { .. })));
    }

    #[tokio::test]
    async fn upload_overwrites_previous_roster() {
        let store = Arc::new(InMemoryRosterStore::new());
        let handler = UploadRosterHandler::new(test_registry(), store.clone());

        handler
            .handle(UploadRosterCommand {
                club_id: CLUB.to_string(),
                rows: vec![row("Doe, John", "12345678"), row("Smith, Jane", "87654321")],
            })
            .await
            .unwrap();
        handler
            .handle(UploadRosterCommand {
                club_id: CLUB.to_string(),
                rows: vec![row("New, Member", "11112222")],
            })
            .await
            .unwrap();

        // Full overwrite, not a merge.
        let stored = store.roster(CLUB).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], RosterHasher::hash("New, Member", "11112222", CLUB).unwrap());
    }
}
