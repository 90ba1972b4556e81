//! Static per-club configuration.
//!
//! Clubs are loaded once at process start from a YAML document and passed by
//! reference into the handlers that need them. There is no ambient registry:
//! anything that resolves a club id receives a [`ClubRegistry`] explicitly.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Column labels used by the roster upload caller to locate name and
/// identifier values in a parsed sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterColumns {
    pub name: String,
    pub identifier: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            name: "Name".to_string(),
            identifier: "Card Number".to_string(),
        }
    }
}

/// Immutable definition of one club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubDefinition {
    /// Stable identifier, also the salt for roster hashing.
    pub id: String,

    /// Human-readable name shown on issued passes.
    pub display_name: String,

    /// Suffix appended to the issuer id to form the wallet class id.
    pub class_suffix: String,

    /// Club logo, embedded into both platforms' artifacts.
    #[serde(default)]
    pub logo_url: Option<String>,

    /// Wide hero/strip image shown below the card content.
    #[serde(default)]
    pub hero_image_url: Option<String>,

    /// Template applied to build the roster-matching name,
    /// e.g. `"{last}, {first}"`.
    #[serde(default = "default_name_format")]
    pub name_format: String,

    /// Member benefits listed on the class template.
    #[serde(default)]
    pub benefits: Vec<String>,

    /// Roster sheet column labels.
    #[serde(default)]
    pub roster_columns: RosterColumns,
}

fn default_name_format() -> String {
    "{last}, {first}".to_string()
}

impl ClubDefinition {
    /// Formats a first/last name pair the way this club's roster stores it.
    pub fn format_name(&self, first_name: &str, last_name: &str) -> String {
        self.name_format
            .replace("{last}", last_name.trim())
            .replace("{first}", first_name.trim())
    }

    /// Full wallet class id for this club under the given issuer.
    pub fn class_id(&self, issuer_id: &str) -> String {
        format!("{}.{}", issuer_id, self.class_suffix)
    }
}

/// All clubs known to this deployment, keyed by club id.
#[derive(Debug, Clone, Default)]
pub struct ClubRegistry {
    clubs: HashMap<String, ClubDefinition>,
}

/// Errors raised while loading the club registry.
#[derive(Debug, thiserror::Error)]
pub enum ClubRegistryError {
    #[error("failed to read club registry file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse club registry: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("duplicate club id '{0}'")]
    DuplicateId(String),
}

impl ClubRegistry {
    /// Builds a registry from a list of definitions. Duplicate ids are rejected.
    pub fn new(definitions: Vec<ClubDefinition>) -> Result<Self, ClubRegistryError> {
        let mut clubs = HashMap::with_capacity(definitions.len());
        for club in definitions {
            if clubs.contains_key(&club.id) {
                return Err(ClubRegistryError::DuplicateId(club.id));
            }
            clubs.insert(club.id.clone(), club);
        }
        Ok(Self { clubs })
    }

    /// Loads the registry from a YAML file containing a list of clubs.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ClubRegistryError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Parses a registry from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ClubRegistryError> {
        let definitions: Vec<ClubDefinition> = serde_yaml::from_str(text)?;
        Self::new(definitions)
    }

    /// Looks up a club by id. Returns `None` for unknown ids; callers decide
    /// whether that is a validation error or a uniform verification failure.
    pub fn get(&self, club_id: &str) -> Option<&ClubDefinition> {
        self.clubs.get(club_id)
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }
}
