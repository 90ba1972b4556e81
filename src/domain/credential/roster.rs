//! Roster entry shape stored per enrolled member.

use serde::{Deserialize, Serialize};

/// One hashed member record. No plaintext, no per-record salt: the salt is
/// the club id, applied uniformly across the roster (see [`RosterHasher`]).
///
/// [`RosterHasher`]: super::RosterHasher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Hex-encoded derived key.
    pub hash: String,
}

impl RosterEntry {
    /// Decodes the stored hex into raw bytes. Returns `None` for entries
    /// that are not valid hex; the verifier skips those rather than failing.
    pub fn hash_bytes(&self) -> Option<Vec<u8>> {
        hex::decode(&self.hash).ok()
    }
}
