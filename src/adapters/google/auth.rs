//! Service-account OAuth2 for the Google Wallet REST API.
//!
//! Signs a JWT assertion with the service account's RSA key and trades it
//! for a short-lived bearer token. Tokens are cached and refreshed shortly
//! before expiry so concurrent issuances share one grant.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::ports::WalletPlatformError;

const WALLET_SCOPE: &str = "https://www.googleapis.com/auth/wallet_object.issuer";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const ASSERTION_LIFETIME_SECS: u64 = 3600;
/// Refresh this long before the token actually expires.
const REFRESH_MARGIN_SECS: u64 = 60;

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    access_token: String,
    expires_at: SystemTime,
}

pub struct ServiceAccountAuth {
    client: Client,
    client_email: String,
    encoding_key: EncodingKey,
    token_url: String,
    cached: RwLock<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    pub fn new(
        client_email: String,
        private_key_pem: &SecretString,
    ) -> Result<Self, WalletPlatformError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.expose_secret().as_bytes())
            .map_err(|e| WalletPlatformError::Auth(format!("invalid service account key: {}", e)))?;
        Ok(Self {
            client: Client::new(),
            client_email,
            encoding_key,
            token_url: TOKEN_URL.to_string(),
            cached: RwLock::new(None),
        })
    }

    #[cfg(test)]
    fn with_token_url(mut self, url: String) -> Self {
        self.token_url = url;
        self
    }

    /// Returns a bearer token for the wallet issuer scope, fetching a fresh
    /// one only when the cached token is missing or about to expire.
    pub async fn bearer_token(&self) -> Result<String, WalletPlatformError> {
        if let Some(token) = self.cached_if_fresh().await {
            return Ok(token);
        }

        let mut cached = self.cached.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(token) = cached.as_ref().filter(|t| Self::is_fresh(t)) {
            return Ok(token.access_token.clone());
        }

        let response = self.fetch_token().await?;
        let token = response.access_token.clone();
        *cached = Some(CachedToken {
            access_token: response.access_token,
            expires_at: SystemTime::now() + Duration::from_secs(response.expires_in),
        });
        tracing::debug!("wallet api token refreshed");
        Ok(token)
    }

    async fn cached_if_fresh(&self) -> Option<String> {
        let cached = self.cached.read().await;
        cached
            .as_ref()
            .filter(|t| Self::is_fresh(t))
            .map(|t| t.access_token.clone())
    }

    fn is_fresh(token: &CachedToken) -> bool {
        SystemTime::now() + Duration::from_secs(REFRESH_MARGIN_SECS) < token.expires_at
    }

    async fn fetch_token(&self) -> Result<TokenResponse, WalletPlatformError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| WalletPlatformError::Auth(e.to_string()))?
            .as_secs();

        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: WALLET_SCOPE,
            aud: &self.token_url,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| WalletPlatformError::Auth(format!("failed to sign assertion: {}", e)))?;

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WalletPlatformError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WalletPlatformError::Auth(format!(
                "token exchange failed with status {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WalletPlatformError::Auth(format!("malformed token response: {}", e)))
    }
}
