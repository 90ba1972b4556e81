//! Google Wallet generic-class REST client.
//!
//! Speaks to the `genericClass` resource of the wallet objects API and
//! translates its status codes into [`WalletPlatformError`] variants the
//! application layer can branch on (409 conflict in particular drives the
//! create-then-update protocol).

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::adapters::google::auth::ServiceAccountAuth;
use crate::ports::{WalletPlatformClient, WalletPlatformError};

const WALLET_API_BASE: &str = "https://walletobjects.googleapis.com/walletobjects/v1";

pub struct GoogleWalletClient {
    client: Client,
    auth: Arc<ServiceAccountAuth>,
    base_url: String,
}

impl GoogleWalletClient {
    pub fn new(auth: Arc<ServiceAccountAuth>) -> Self {
        Self {
            client: Client::new(),
            auth,
            base_url: WALLET_API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn class_url(&self, class_id: &str) -> String {
        format!("{}/genericClass/{}", self.base_url, class_id)
    }

    async fn error_for(response: reqwest::Response) -> WalletPlatformError {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        match status {
            StatusCode::CONFLICT => WalletPlatformError::Conflict,
            StatusCode::NOT_FOUND => WalletPlatformError::NotFound,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                WalletPlatformError::Auth(format!("wallet api returned {}: {}", status, message))
            }
            _ => WalletPlatformError::Upstream {
                status: status.as_u16(),
                message,
            },
        }
    }

    async fn parse_body(response: reqwest::Response) -> Result<Value, WalletPlatformError> {
        response
            .json()
            .await
            .map_err(|e| WalletPlatformError::Transport(format!("malformed wallet response: {}", e)))
    }
}

#[async_trait]
impl WalletPlatformClient for GoogleWalletClient {
    async fn insert_class(&self, template: &Value) -> Result<Value, WalletPlatformError> {
        let token = self.auth.bearer_token().await?;
        let response = self
            .client
            .post(format!("{}/genericClass", self.base_url))
            .bearer_auth(token)
            .json(template)
            .send()
            .await
            .map_err(|e| WalletPlatformError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        Self::parse_body(response).await
    }

    async fn update_class(
        &self,
        class_id: &str,
        template: &Value,
    ) -> Result<Value, WalletPlatformError> {
        let token = self.auth.bearer_token().await?;
        let response = self
            .client
            .put(self.class_url(class_id))
            .bearer_auth(token)
            .json(template)
            .send()
            .await
            .map_err(|e| WalletPlatformError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        Self::parse_body(response).await
    }

    async fn get_class(&self, class_id: &str) -> Result<Option<Value>, WalletPlatformError> {
        let token = self.auth.bearer_token().await?;
        let response = self
            .client
            .get(self.class_url(class_id))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| WalletPlatformError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        Self::parse_body(response).await.map(Some)
    }

    async fn list_classes(&self, issuer_id: &str) -> Result<Value, WalletPlatformError> {
        let token = self.auth.bearer_token().await?;
        let response = self
            .client
            .get(format!("{}/genericClass", self.base_url))
            .query(&[("issuerId", issuer_id)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| WalletPlatformError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        Self::parse_body(response).await
    }
}
