//! HTTP image fetcher for pass assets.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::ports::{ImageFetchError, ImageFetcher};

pub struct ReqwestImageFetcher {
    client: Client,
}

impl ReqwestImageFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for ReqwestImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageFetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ImageFetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageFetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_surfaces_client_build_result() {
        assert!(ReqwestImageFetcher::new().is_ok());
    }
}
