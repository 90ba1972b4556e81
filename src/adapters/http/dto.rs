//! HTTP DTOs for the issuance API.
//!
//! These types decouple the HTTP API from domain types; field names match
//! what the web client sends and expects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to verify a member and issue their passes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePassRequest {
    pub first_name: String,
    pub last_name: String,
    pub card_number: String,
    pub club: String,
}

/// One roster row in an upload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRosterRow {
    pub name: String,
    pub card_number: String,
}

/// Request replacing a club's roster.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadRosterRequest {
    pub rows: Vec<UploadRosterRow>,
}

/// Request to create or update a wallet class.
#[derive(Debug, Clone, Deserialize)]
pub struct EnsureClassRequest {
    pub id: String,
    pub template: Value,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Apple stage result attached to a successful issuance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ApplePassDto {
    /// Base64 of the signed `.pkpass` archive.
    Generated { data: String },
    Skipped { reason: String },
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePassResponse {
    pub google_save_url: String,
    pub member_id: String,
    pub apple_pass: ApplePassDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadRosterResponse {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsureClassResponse {
    pub id: String,
    pub class: Value,
}

/// Uniform error body for every non-2xx response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
