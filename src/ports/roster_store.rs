//! Roster storage port.
//!
//! The roster is one blob per club, keyed `{club_id}-members.json`, and is
//! always replaced whole: an upload overwrites the previous roster rather
//! than merging into it.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::credential::RosterEntry;

/// Storage key for a club's roster blob.
pub fn roster_key(club_id: &str) -> String {
    format!("{}-members.json", club_id)
}

/// Errors from the roster storage collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterStoreError {
    /// No roster exists for the club.
    #[error("roster not found for club '{0}'")]
    NotFound(String),

    /// The stored blob could not be decoded.
    #[error("roster blob is not valid JSON: {0}")]
    Decode(String),

    /// Transport or filesystem failure.
    #[error("roster storage failure: {0}")]
    Io(String),
}

/// Port for fetching and overwriting per-club roster blobs.
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Fetches all entries of a club's roster.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no roster was ever uploaded for the club
    /// - `Decode` when the blob exists but is unreadable
    /// - `Io` on transport failure
    async fn fetch_roster(&self, club_id: &str) -> Result<Vec<RosterEntry>, RosterStoreError>;

    /// Replaces the club's roster with the given entries.
    async fn store_roster(
        &self,
        club_id: &str,
        entries: &[RosterEntry],
    ) -> Result<(), RosterStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_key_is_deterministic() {
        assert_eq!(
            roster_key("data-science-student-society"),
            "data-science-student-society-members.json"
        );
    }

    #[test]
    fn roster_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn RosterStore) {}
    }
}
