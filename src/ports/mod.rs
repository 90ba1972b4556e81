//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the issuance engine and its collaborators: roster storage, the wallet
//! platform's class registry, remote image hosts, and the Apple signing
//! pipeline. Adapters implement these traits; tests substitute fakes.

mod apple_pass_generator;
mod image_fetcher;
mod roster_store;
mod wallet_platform;

pub use apple_pass_generator::{ApplePassGenerator, PassBuildError};
pub use image_fetcher::{ImageFetchError, ImageFetcher};
pub use roster_store::{roster_key, RosterStore, RosterStoreError};
pub use wallet_platform::{WalletPlatformClient, WalletPlatformError};
