//! Apple Wallet `pass.json` model.
//!
//! Field mapping mirrors the Google object: member name as the primary
//! field, the 8-character member-id prefix and valid-until year as
//! secondary fields, one QR barcode carrying the full member id.

use serde::{Deserialize, Serialize};

use crate::domain::club::ClubDefinition;
use crate::domain::pass::{valid_until_year, PassData};

/// Platform identifiers baked into every pass for one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppleIdentifiers {
    pub pass_type_identifier: String,
    pub team_identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassField {
    pub key: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassBarcode {
    pub format: String,
    pub message: String,
    pub message_encoding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCard {
    pub primary_fields: Vec<PassField>,
    pub secondary_fields: Vec<PassField>,
}

/// The `pass.json` document of a `.pkpass` bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePass {
    pub format_version: u8,
    pub pass_type_identifier: String,
    pub team_identifier: String,
    pub serial_number: String,
    pub organization_name: String,
    pub description: String,
    pub logo_text: String,
    pub background_color: String,
    pub foreground_color: String,
    pub label_color: String,
    pub store_card: StoreCard,
    pub barcodes: Vec<PassBarcode>,
}

/// Builds the pass document for one member.
pub fn build_apple_pass(
    pass: &PassData,
    club: &ClubDefinition,
    ids: &AppleIdentifiers,
) -> ApplePass {
    ApplePass {
        format_version: 1,
        pass_type_identifier: ids.pass_type_identifier.clone(),
        team_identifier: ids.team_identifier.clone(),
        serial_number: pass.member_id.clone(),
        organization_name: club.display_name.clone(),
        description: format!("Membership Pass for {}", club.display_name),
        logo_text: club.display_name.clone(),
        // rgb(219, 213, 255) matches the Google card background #dbd5ff.
        background_color: "rgb(219, 213, 255)".to_string(),
        foreground_color: "rgb(0, 0, 0)".to_string(),
        label_color: "rgb(60, 60, 60)".to_string(),
        store_card: StoreCard {
            primary_fields: vec![PassField {
                key: "name".to_string(),
                label: "Name".to_string(),
                value: pass.display_name.clone(),
            }],
            secondary_fields: vec![
                PassField {
                    key: "memberId".to_string(),
                    label: "Member ID".to_string(),
                    value: pass.member_id_prefix(),
                },
                PassField {
                    key: "validYear".to_string(),
                    label: "Valid Until".to_string(),
                    value: valid_until_year(),
                },
            ],
        },
        barcodes: vec![PassBarcode {
            format: "PKBarcodeFormatQR".to_string(),
            message: pass.member_id.clone(),
            message_encoding: "iso-8859-1".to_string(),
            alt_text: Some(pass.member_id.clone()),
        }],
    }
}
