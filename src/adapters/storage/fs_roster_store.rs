//! Filesystem roster store for development and tests.
//!
//! Lays rosters out exactly like the bucket store would:
//! `{base_dir}/{club_id}-members.json`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::domain::credential::RosterEntry;
use crate::ports::{roster_key, RosterStore, RosterStoreError};

pub struct FsRosterStore {
    base_dir: PathBuf,
}

impl FsRosterStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn blob_path(&self, club_id: &str) -> PathBuf {
        self.base_dir.join(roster_key(club_id))
    }
}

#[async_trait]
impl RosterStore for FsRosterStore {
    async fn fetch_roster(&self, club_id: &str) -> Result<Vec<RosterEntry>, RosterStoreError> {
        let path = self.blob_path(club_id);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RosterStoreError::NotFound(club_id.to_string()));
            }
            Err(e) => return Err(RosterStoreError::Io(format!("failed to read roster: {}", e))),
        };

        serde_json::from_slice(&bytes).map_err(|e| RosterStoreError::Decode(e.to_string()))
    }

    async fn store_roster(
        &self,
        club_id: &str,
        entries: &[RosterEntry],
    ) -> Result<(), RosterStoreError> {
        let path = self.blob_path(club_id);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RosterStoreError::Io(format!("failed to create directory: {}", e)))?;
        }

        let content = serde_json::to_vec(entries)
            .map_err(|e| RosterStoreError::Io(format!("failed to encode roster: {}", e)))?;

        // Write atomically through a temporary file so a concurrent
        // verification never reads a half-written roster.
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content)
            .await
            .map_err(|e| RosterStoreError::Io(format!("failed to write roster: {}", e)))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| RosterStoreError::Io(format!("failed to move roster into place: {}", e)))?;

        Ok(())
    }
}
