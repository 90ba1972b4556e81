//! Roster storage configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Which roster store backs the engine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local directory of roster blobs; development default.
    #[default]
    Filesystem,
    /// Remote HTTP object-storage bucket.
    Bucket,
}

/// Roster storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the filesystem backend
    #[serde(default = "default_base_dir")]
    pub base_dir: String,

    /// Storage service base URL (bucket backend)
    #[serde(default)]
    pub bucket_url: Option<String>,

    /// Bucket holding the roster blobs
    #[serde(default = "default_bucket_name")]
    pub bucket_name: String,

    /// Service key authorizing bucket access
    #[serde(default)]
    pub service_key: Option<SecretString>,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::Bucket
            && (self.bucket_url.is_none() || self.service_key.is_none())
        {
            return Err(ValidationError::IncompleteBucketConfig);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            base_dir: default_base_dir(),
            bucket_url: None,
            bucket_name: default_bucket_name(),
            service_key: None,
        }
    }
}

fn default_base_dir() -> String {
    "./data/rosters".to_string()
}

fn default_bucket_name() -> String {
    "member-data".to_string()
}
