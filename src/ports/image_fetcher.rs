//! Remote image fetching port.
//!
//! Apple pass assets are fetched from remote URLs and embedded as binary
//! resources. Fetch failures are non-fatal for the caller: a pass without
//! its logo is still a valid pass.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImageFetchError {
    #[error("image request failed for {url}: {message}")]
    Request { url: String, message: String },

    #[error("image host returned status {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Port for downloading image bytes.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageFetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_fetcher_is_object_safe() {
        fn _accepts_dyn(_fetcher: &dyn ImageFetcher) {}
    }
}
