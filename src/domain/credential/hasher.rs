//! Deterministic salted one-way hashing of member identity.
//!
//! The scheme is fixed by the rosters already uploaded in production:
//! changing any step invalidates every stored hash.
//!
//! - The name is trimmed and lowercased; matching is case-insensitive.
//! - The identifier is trimmed only.
//! - Name and identifier are concatenated with no delimiter.
//! - scrypt derives 64 bytes using the club id as salt, hex-encoded.
//!
//! The club-id salt is shared by every member of a club, which permits
//! per-club precomputed dictionary attacks, and the undelimited
//! concatenation admits cross-field collisions (`"ab" + "12"` hashes the
//! same as `"a" + "b12"`). Both are known properties of the stored rosters;
//! a scheme revision would need a version tag written alongside each hash.

use scrypt::{scrypt, Params};

use super::errors::CredentialError;
use super::roster::RosterEntry;

/// Derived key length in bytes. Rosters written with a different length
/// cannot match and are skipped by the verifier.
pub const DERIVED_KEY_LEN: usize = 64;

/// scrypt cost parameters: N = 2^14, r = 8, p = 1. Fixed so each derivation
/// has a bounded memory and CPU cost.
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Stateless hasher for roster records and verification candidates.
pub struct RosterHasher;

impl RosterHasher {
    /// Hashes one member identity into a roster entry.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Kdf`] if the derivation fails. This is
    /// fatal for the caller; it must not be treated as a mismatch.
    pub fn hash(name: &str, identifier: &str, club_id: &str) -> Result<RosterEntry, CredentialError> {
        let input = format!("{}{}", name.trim().to_lowercase(), identifier.trim());

        let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, DERIVED_KEY_LEN)
            .map_err(|e| CredentialError::Kdf(e.to_string()))?;

        let mut derived = [0u8; DERIVED_KEY_LEN];
        scrypt(input.as_bytes(), club_id.as_bytes(), &params, &mut derived)
            .map_err(|e| CredentialError::Kdf(e.to_string()))?;

        Ok(RosterEntry {
            hash: hex::encode(derived),
        })
    }

    /// Runs [`RosterHasher::hash`] on the blocking thread pool so the
    /// memory-hard derivation never stalls the async runtime.
    pub async fn hash_async(
        name: String,
        identifier: String,
        club_id: String,
    ) -> Result<RosterEntry, CredentialError> {
        tokio::task::spawn_blocking(move || Self::hash(&name, &identifier, &club_id))
            .await
            .map_err(|e| CredentialError::Kdf(format!("hash task failed: {}", e)))?
    }
}
