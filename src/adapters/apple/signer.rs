//! Apple Wallet `.pkpass` assembly and PKCS#7 signing.
//!
//! A `.pkpass` is a zip archive: `pass.json`, optional image assets, a
//! `manifest.json` mapping every file to its SHA-1 digest, and a detached
//! PKCS#7 `signature` over the manifest made with the pass type id
//! certificate and chained through Apple's WWDR intermediate.
//!
//! Image assets are fetched from the club's configured URLs; a fetch
//! failure drops that asset with a warning rather than failing the pass.

use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::sync::Arc;

use async_trait::async_trait;
use openssl::pkcs7::{Pkcs7, Pkcs7Flags};
use openssl::pkey::{PKey, Private};
use openssl::stack::Stack;
use openssl::x509::X509;
use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::domain::club::ClubDefinition;
use crate::domain::pass::PassData;
use crate::domain::wallet::{build_apple_pass, AppleIdentifiers};
use crate::ports::{ApplePassGenerator, ImageFetcher, PassBuildError};

/// PEM material needed to sign passes for one pass type id.
pub struct AppleSigningCredentials {
    pub signer_certificate_pem: String,
    pub signer_key_pem: SecretString,
    pub wwdr_certificate_pem: String,
}

pub struct ApplePassSigner {
    identifiers: AppleIdentifiers,
    certificate: X509,
    key: PKey<Private>,
    wwdr: X509,
    images: Arc<dyn ImageFetcher>,
}

impl ApplePassSigner {
    pub fn new(
        identifiers: AppleIdentifiers,
        credentials: &AppleSigningCredentials,
        images: Arc<dyn ImageFetcher>,
    ) -> Result<Self, PassBuildError> {
        let certificate = X509::from_pem(credentials.signer_certificate_pem.as_bytes())
            .map_err(|e| PassBuildError::Signing(format!("invalid signer certificate: {}", e)))?;
        let key = PKey::private_key_from_pem(credentials.signer_key_pem.expose_secret().as_bytes())
            .map_err(|e| PassBuildError::Signing(format!("invalid signer key: {}", e)))?;
        let wwdr = X509::from_pem(credentials.wwdr_certificate_pem.as_bytes())
            .map_err(|e| PassBuildError::Signing(format!("invalid WWDR certificate: {}", e)))?;

        Ok(Self {
            identifiers,
            certificate,
            key,
            wwdr,
            images,
        })
    }

    /// Downloads the club's pass assets. Every asset is optional.
    async fn collect_images(&self, club: &ClubDefinition) -> BTreeMap<String, Vec<u8>> {
        let mut files = BTreeMap::new();

        if let Some(url) = &club.logo_url {
            match self.images.fetch(url).await {
                Ok(bytes) => {
                    for name in ["logo.png", "logo@2x.png", "icon.png", "icon@2x.png"] {
                        files.insert(name.to_string(), bytes.clone());
                    }
                }
                Err(e) => {
                    tracing::warn!(club_id = %club.id, error = %e, "skipping pass logo asset");
                }
            }
        }

        if let Some(url) = &club.hero_image_url {
            match self.images.fetch(url).await {
                Ok(bytes) => {
                    files.insert("strip.png".to_string(), bytes.clone());
                    files.insert("strip@2x.png".to_string(), bytes);
                }
                Err(e) => {
                    tracing::warn!(club_id = %club.id, error = %e, "skipping pass strip asset");
                }
            }
        }

        files
    }

    fn build_manifest(files: &BTreeMap<String, Vec<u8>>) -> Result<Vec<u8>, PassBuildError> {
        let digests: BTreeMap<&str, String> = files
            .iter()
            .map(|(name, bytes)| (name.as_str(), hex::encode(Sha1::digest(bytes))))
            .collect();
        serde_json::to_vec(&digests).map_err(|e| PassBuildError::Serialize(e.to_string()))
    }

    fn sign_manifest(&self, manifest: &[u8]) -> Result<Vec<u8>, PassBuildError> {
        let mut chain = Stack::new()
            .map_err(|e| PassBuildError::Signing(e.to_string()))?;
        chain
            .push(self.wwdr.clone())
            .map_err(|e| PassBuildError::Signing(e.to_string()))?;

        let signature = Pkcs7::sign(
            &self.certificate,
            &self.key,
            &chain,
            manifest,
            Pkcs7Flags::BINARY | Pkcs7Flags::DETACHED,
        )
        .map_err(|e| PassBuildError::Signing(e.to_string()))?;

        signature
            .to_der()
            .map_err(|e| PassBuildError::Signing(e.to_string()))
    }

    fn build_archive(files: &BTreeMap<String, Vec<u8>>) -> Result<Vec<u8>, PassBuildError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for (name, bytes) in files {
            writer
                .start_file(name, options)
                .map_err(|e| PassBuildError::Archive(e.to_string()))?;
            writer
                .write_all(bytes)
                .map_err(|e| PassBuildError::Archive(e.to_string()))?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| PassBuildError::Archive(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

#[async_trait]
impl ApplePassGenerator for ApplePassSigner {
    async fn generate(
        &self,
        pass: &PassData,
        club: &ClubDefinition,
    ) -> Result<Vec<u8>, PassBuildError> {
        let document = build_apple_pass(pass, club, &self.identifiers);
        let pass_json = serde_json::to_vec(&document)
            .map_err(|e| PassBuildError::Serialize(e.to_string()))?;

        let mut files = self.collect_images(club).await;
        files.insert("pass.json".to_string(), pass_json);

        // The manifest covers every file except itself and the signature.
        let manifest = Self::build_manifest(&files)?;
        let signature = self.sign_manifest(&manifest)?;
        files.insert("manifest.json".to_string(), manifest);
        files.insert("signature".to_string(), signature);

        Self::build_archive(&files)
    }
}
