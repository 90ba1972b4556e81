//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `club` - Static per-club configuration and the registry
//! - `credential` - Roster hashing and claim verification
//! - `pass` - Canonical issuance record
//! - `wallet` - Platform payload mapping (Google and Apple)
//! - `errors` - Engine-wide error taxonomy
//!
//! No I/O happens here except through the port interfaces.

pub mod club;
pub mod credential;
pub mod errors;
pub mod pass;
pub mod wallet;
