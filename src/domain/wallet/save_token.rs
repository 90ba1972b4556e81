//! Signed "save to wallet" tokens.
//!
//! The generic object is wrapped in an RS256 JWT whose signed form becomes
//! the save URL handed back to the member.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::google_object::GenericObject;
use crate::domain::errors::{IssuanceError, Platform};

const SAVE_URL_BASE: &str = "https://pay.google.com/gp/v/save";

/// Claim set for a one-time save intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveTokenClaims {
    /// Service-account email the token is issued by.
    pub iss: String,
    /// Always `"google"`.
    pub aud: String,
    /// Always `"savetowallet"`.
    pub typ: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Origins allowed to render the save button; empty for link flows.
    pub origins: Vec<String>,
    pub payload: SaveTokenPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTokenPayload {
    pub generic_objects: Vec<GenericObject>,
}

/// Signs save tokens with the issuer's service-account key.
pub struct SaveUrlSigner {
    service_account_email: String,
    encoding_key: EncodingKey,
    origins: Vec<String>,
}

impl SaveUrlSigner {
    /// Builds a signer from a PEM-encoded RSA private key. `origins` lists
    /// the web origins allowed to render the save button; empty means any.
    ///
    /// # Errors
    ///
    /// Returns [`IssuanceError::Configuration`] when the key cannot be
    /// parsed; issuance cannot proceed without it.
    pub fn new(
        service_account_email: impl Into<String>,
        private_key_pem: &SecretString,
        origins: Vec<String>,
    ) -> Result<Self, IssuanceError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.expose_secret().as_bytes())
            .map_err(|e| {
                IssuanceError::configuration(format!("invalid Google private key: {}", e))
            })?;
        Ok(Self {
            service_account_email: service_account_email.into(),
            encoding_key,
            origins,
        })
    }

    /// Wraps one object in a signed save token and renders the save URL.
    pub fn save_url(&self, object: GenericObject) -> Result<String, IssuanceError> {
        let claims = SaveTokenClaims {
            iss: self.service_account_email.clone(),
            aud: "google".to_string(),
            typ: "savetowallet".to_string(),
            iat: Utc::now().timestamp(),
            origins: self.origins.clone(),
            payload: SaveTokenPayload {
                generic_objects: vec![object],
            },
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| {
                IssuanceError::upstream(Platform::GoogleWallet, format!("token signing failed: {}", e))
            })?;

        Ok(format!("{}/{}", SAVE_URL_BASE, token))
    }
}
