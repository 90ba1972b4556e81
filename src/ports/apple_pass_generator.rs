//! Apple pass generation port.
//!
//! Implemented by the signing adapter when a complete credential bundle is
//! configured. The orchestrator holds an `Option` of this port: `None`
//! means the platform is not configured and the stage is skipped.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::club::ClubDefinition;
use crate::domain::pass::PassData;

/// Errors from building or signing an Apple pass bundle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PassBuildError {
    #[error("pass signing failed: {0}")]
    Signing(String),

    #[error("pass archive assembly failed: {0}")]
    Archive(String),

    #[error("pass serialization failed: {0}")]
    Serialize(String),
}

/// Port producing signed `.pkpass` archive bytes for one member.
#[async_trait]
pub trait ApplePassGenerator: Send + Sync {
    async fn generate(
        &self,
        pass: &PassData,
        club: &ClubDefinition,
    ) -> Result<Vec<u8>, PassBuildError>;
}
