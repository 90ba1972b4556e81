//! Google Wallet generic-object payload mapping.
//!
//! The mapping from [`PassData`] + [`ClubDefinition`] to the payload is
//! deterministic; the only request-specific input is the member id.

use serde::{Deserialize, Serialize};

use crate::domain::club::ClubDefinition;
use crate::domain::pass::{valid_until_year, PassData};

/// Card background, shared with the Apple pass colors.
pub const CARD_BACKGROUND_HEX: &str = "#dbd5ff";

/// Localized string wrapper as the wallet API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedString {
    pub default_value: TranslatedString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedString {
    pub language: String,
    pub value: String,
}

impl LocalizedString {
    pub fn en(value: impl Into<String>) -> Self {
        Self {
            default_value: TranslatedString {
                language: "en-US".to_string(),
                value: value.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUri {
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageModule {
    pub source_uri: ImageUri,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<LocalizedString>,
}

impl ImageModule {
    pub fn new(uri: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            source_uri: ImageUri { uri: uri.into() },
            content_description: Some(LocalizedString::en(description)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextModule {
    pub id: String,
    pub header: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    #[serde(rename = "type")]
    pub barcode_type: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_text: Option<String>,
}

/// One generic wallet object, issued per member against a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericObject {
    pub id: String,
    pub class_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageModule>,
    pub card_title: LocalizedString,
    pub subheader: LocalizedString,
    pub header: LocalizedString,
    pub text_modules_data: Vec<TextModule>,
    pub barcode: Barcode,
    pub hex_background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<ImageModule>,
}

/// Maps canonical pass data onto the generic-object shape.
///
/// Object id is `{issuer}.{member_id}`; class id is `{issuer}.{suffix}`.
pub fn build_generic_object(
    pass: &PassData,
    club: &ClubDefinition,
    issuer_id: &str,
) -> GenericObject {
    GenericObject {
        id: format!("{}.{}", issuer_id, pass.member_id),
        class_id: club.class_id(issuer_id),
        logo: club
            .logo_url
            .as_ref()
            .map(|uri| ImageModule::new(uri, "Club Logo")),
        card_title: LocalizedString::en(&club.display_name),
        subheader: LocalizedString::en("Name"),
        header: LocalizedString::en(&pass.display_name),
        text_modules_data: vec![
            TextModule {
                id: "member_id".to_string(),
                header: "Member ID".to_string(),
                body: pass.member_id_prefix(),
            },
            TextModule {
                id: "valid_for".to_string(),
                header: "Valid Until".to_string(),
                body: valid_until_year(),
            },
        ],
        barcode: Barcode {
            barcode_type: "QR_CODE".to_string(),
            value: pass.member_id.clone(),
            alternate_text: Some(club.display_name.clone()),
        },
        hex_background_color: CARD_BACKGROUND_HEX.to_string(),
        hero_image: club
            .hero_image_url
            .as_ref()
            .map(|uri| ImageModule::new(uri, "Footer Image")),
    }
}
