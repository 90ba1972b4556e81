//! Claim verification against a club's stored hash roster.

use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::ports::{RosterStore, RosterStoreError};

use super::errors::CredentialError;
use super::hasher::RosterHasher;

/// Verifies (name, identifier, club) claims by recomputing the candidate
/// hash and scanning the club's roster for a byte-exact match.
///
/// Absence of a roster is "no valid members", never an error: a caller
/// probing with unknown club ids learns nothing beyond a generic failure.
pub struct CredentialVerifier {
    store: Arc<dyn RosterStore>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self { store }
    }

    /// Returns `Ok(true)` when the claim matches a roster entry.
    ///
    /// Store failures of any kind are logged and collapse to `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Only a key-derivation failure propagates; it must abort the request
    /// rather than being read as a mismatch.
    pub async fn verify(
        &self,
        name: &str,
        identifier: &str,
        club_id: &str,
    ) -> Result<bool, CredentialError> {
        let entries = match self.store.fetch_roster(club_id).await {
            Ok(entries) => entries,
            Err(RosterStoreError::NotFound(_)) => {
                tracing::warn!(club_id, "no roster uploaded for club");
                return Ok(false);
            }
            Err(e) => {
                tracing::warn!(club_id, error = %e, "roster fetch failed");
                return Ok(false);
            }
        };

        tracing::debug!(club_id, entries = entries.len(), "roster loaded");

        let candidate = RosterHasher::hash_async(
            name.to_string(),
            identifier.to_string(),
            club_id.to_string(),
        )
        .await?;
        let candidate_bytes = match candidate.hash_bytes() {
            Some(bytes) => bytes,
            None => return Err(CredentialError::Kdf("derived hash is not hex".to_string())),
        };

        for entry in &entries {
            let stored = match entry.hash_bytes() {
                Some(bytes) => bytes,
                // Corrupt entry: skip, never match.
                None => continue,
            };
            // Entries from a different hashing revision have a different
            // length and can never match; they must not reach the
            // constant-time comparator.
            if stored.len() != candidate_bytes.len() {
                continue;
            }
            if bool::from(stored.ct_eq(&candidate_bytes)) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credential::RosterEntry;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockRosterStore {
        rosters: Mutex<HashMap<String, Vec<RosterEntry>>>,
        fail_fetch: bool,
    }

    impl MockRosterStore {
        fn with_roster(club_id: &str, entries: Vec<RosterEntry>) -> Self {
            let mut rosters = HashMap::new();
            rosters.insert(club_id.to_string(), entries);
            Self {
                rosters: Mutex::new(rosters),
                fail_fetch: false,
            }
        }

        fn empty() -> Self {
            Self {
                rosters: Mutex::new(HashMap::new()),
                fail_fetch: false,
            }
        }

        fn failing() -> Self {
            Self {
                rosters: Mutex::new(HashMap::new()),
                fail_fetch: true,
            }
        }
    }

    #[async_trait]
    impl RosterStore for MockRosterStore {
        async fn fetch_roster(&self, club_id: &str) -> Result<Vec<RosterEntry>, RosterStoreError> {
            if self.fail_fetch {
                return Err(RosterStoreError::Io("simulated outage".to_string()));
            }
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

    fn enrolled(name: &str, identifier: &str) -> RosterEntry {
        RosterHasher::hash(name, identifier, CLUB).unwrap()
    }

    #[tokio::test]
    async fn matching_claim_verifies() {
        let store = MockRosterStore::with_roster(CLUB, vec![enrolled("doe, john", "12345678")]);
        let verifier = CredentialVerifier::new(Arc::new(store));

        let ok = verifier.verify("Doe, John", "12345678", CLUB).await.unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn wrong_identifier_fails() {
        let store = MockRosterStore::with_roster(CLUB, vec![enrolled("doe, john", "12345678")]);
        let verifier = CredentialVerifier::new(Arc::new(store));

        let ok = verifier.verify("Doe, John", "12345679", CLUB).await.unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn mutated_name_fails() {
        let store = MockRosterStore::with_roster(CLUB, vec![enrolled("doe, john", "12345678")]);
        let verifier = CredentialVerifier::new(Arc::new(store));

        let ok = verifier.verify("Doe, Joan", "12345678", CLUB).await.unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn missing_roster_is_false_not_error() {
        let verifier = CredentialVerifier::new(Arc::new(MockRosterStore::empty()));

        let ok = verifier.verify("Doe, John", "12345678", CLUB).await.unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn store_outage_is_false_not_error() {
        let verifier = CredentialVerifier::new(Arc::new(MockRosterStore::failing()));

        let ok = verifier.verify("Doe, John", "12345678", CLUB).await.unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn length_mismatched_entries_are_skipped() {
        // A 16-byte hash from an earlier scheme revision alongside a current
        // 64-byte entry: the short one is skipped, the long one still matches.
        let legacy = RosterEntry {
            hash: "00112233445566778899aabbccddeeff".to_string(),
        };
        let store = MockRosterStore::with_roster(
            CLUB,
            vec![legacy, enrolled("doe, john", "12345678")],
        );
        let verifier = CredentialVerifier::new(Arc::new(store));

        let ok = verifier.verify("Doe, John", "12345678", CLUB).await.unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn corrupt_hex_entries_are_skipped() {
        let corrupt = RosterEntry {
            hash: "zz-not-hex".to_string(),
        };
        let store = MockRosterStore::with_roster(CLUB, vec![corrupt]);
        let verifier = CredentialVerifier::new(Arc::new(store));

        let ok = verifier.verify("Doe, John", "12345678", CLUB).await.unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn second_entry_can_match() {
        let store = MockRosterStore::with_roster(
            CLUB,
            vec![
                enrolled("smith, jane", "00000001"),
                enrolled("doe, john", "12345678"),
            ],
        );
        let verifier = CredentialVerifier::new(Arc::new(store));

        let ok = verifier.verify("Doe, John", "12345678", CLUB).await.unwrap();
        assert!(ok);
    }
}
