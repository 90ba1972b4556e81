//! Canonical issuance record shared by both platform builders.

use chrono::{Datelike, Utc};
use uuid::Uuid;

/// Data for one pass, created per issuance request and never persisted.
///
/// The member id is a fresh UUID on every successful verification, so
/// repeated requests for the same identity yield unlinked passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassData {
    /// Name shown on the pass ("First Last", not the roster format).
    pub display_name: String,

    /// The identifier the member submitted with the claim.
    pub identifier: String,

    /// Club the pass belongs to.
    pub club_id: String,

    /// Opaque member token; serial number on Apple, object id suffix on Google.
    pub member_id: String,
}

impl PassData {
    /// Creates pass data with a freshly generated member id.
    pub fn new(
        display_name: impl Into<String>,
        identifier: impl Into<String>,
        club_id: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            identifier: identifier.into(),
            club_id: club_id.into(),
            member_id: Uuid::new_v4().to_string(),
        }
    }

    /// Human-readable short form of the member id shown on the card face.
    pub fn member_id_prefix(&self) -> String {
        self.member_id.chars().take(8).collect::<String>().to_uppercase()
    }
}

/// Current calendar year, displayed as the pass "Valid Until" field.
pub fn valid_until_year() -> String {
    Utc::now().year().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_uuid_member_id() {
        let pass = PassData::new("John Doe", "12345678", "data-science-student-society");
        assert!(Uuid::parse_str(&pass.member_id).is_ok());
    }

    #[test]
    fn member_ids_are_fresh_per_pass() {
        let a = PassData::new("John Doe", "12345678", "c");
        let b = PassData::new("John Doe", "12345678", "c");
        assert_ne!(a.member_id, b.member_id);
    }

    #[test]
    fn member_id_prefix_is_eight_uppercased_chars() {
        let mut pass = PassData::new("John Doe", "12345678", "c");
        pass.member_id = "abcdef12-3456-7890-abcd-ef1234567890".to_string();
        assert_eq!(pass.member_id_prefix(), "ABCDEF12");
    }

    #[test]
    fn valid_until_is_a_four_digit_year() {
        let year = valid_until_year();
        assert_eq!(year.len(), 4);
        assert!(year.parse::<i32>().is_ok());
    }
}
