//! Roster hashing and claim verification.
//!
//! The upload path runs parsed roster rows through [`RosterHasher`] and
//! persists the resulting entries; the issuance path recomputes a candidate
//! hash through the same scheme and compares it against the stored roster in
//! constant time via [`CredentialVerifier`].

mod errors;
mod hasher;
mod roster;
mod verifier;

pub use errors::CredentialError;
pub use hasher::{RosterHasher, DERIVED_KEY_LEN};
pub use roster::RosterEntry;
pub use verifier::CredentialVerifier;
