pub mod signer;

pub use signer::{ApplePassSigner, AppleSigningCredentials};
