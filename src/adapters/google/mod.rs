pub mod auth;
pub mod wallet_client;

pub use auth::ServiceAccountAuth;
pub use wallet_client::GoogleWalletClient;
