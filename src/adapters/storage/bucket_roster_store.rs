//! Roster storage backed by an HTTP object-storage bucket.
//!
//! Rosters live as JSON blobs named `{club_id}-members.json` inside a
//! single private bucket. Uploads use the storage API's upsert header so a
//! re-upload replaces the previous roster in one request.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::credential::RosterEntry;
use crate::ports::{roster_key, RosterStore, RosterStoreError};

pub struct BucketRosterStore {
    client: Client,
    base_url: String,
    bucket: String,
    service_key: SecretString,
}

impl BucketRosterStore {
    pub fn new(base_url: String, bucket: String, service_key: SecretString) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket,
            service_key,
        }
    }

    fn object_url(&self, club_id: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            roster_key(club_id)
        )
    }
}

#[async_trait]
impl RosterStore for BucketRosterStore {
    async fn fetch_roster(&self, club_id: &str) -> Result<Vec<RosterEntry>, RosterStoreError> {
        let response = self
            .client
            .get(self.object_url(club_id))
            .bearer_auth(self.service_key.expose_secret())
            .send()
            .await
            .map_err(|e| RosterStoreError::Io(format!("storage request failed: {}", e)))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return Err(RosterStoreError::NotFound(club_id.to_string()));
            }
            status => {
                return Err(RosterStoreError::Io(format!(
                    "storage returned status {}",
                    status
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RosterStoreError::Io(format!("failed to read storage body: {}", e)))?;

        serde_json::from_slice(&bytes).map_err(|e| RosterStoreError::Decode(e.to_string()))
    }

    async fn store_roster(
        &self,
        club_id: &str,
        entries: &[RosterEntry],
    ) -> Result<(), RosterStoreError> {
        let body = serde_json::to_vec(entries)
            .map_err(|e| RosterStoreError::Io(format!("failed to encode roster: {}", e)))?;

        let response = self
            .client
            .post(self.object_url(club_id))
            .bearer_auth(self.service_key.expose_secret())
            .header("content-type", "application/json")
            .header("x-upsert", "true")
            .body(body)
            .send()
            .await
            .map_err(|e| RosterStoreError::Io(format!("storage request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RosterStoreError::Io(format!(
                "storage upload returned status {}",
                response.status()
            )));
        }

        Ok(())
    }
}
