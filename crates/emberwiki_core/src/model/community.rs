//! Community identity and metadata.
//!
//! # Responsibility
//! - Validate community names used as directory identities.
//! - Define the metadata document persisted per community.
//!
//! # Invariants
//! - A rename moves the community directory; metadata is never rewritten.
//! - Metadata wire keys are fixed and capitalized (`Name`, `Genre`, ...).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Community name validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommunityNameError {
    /// Name is empty after trimming.
    Empty,
    /// Name contains a path separator.
    ContainsSeparator(String),
    /// Name starts with a character reserved by the storage layout.
    ReservedPrefix(String),
}

impl Display for CommunityNameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "community name cannot be empty"),
            Self::ContainsSeparator(value) => {
                write!(f, "community name cannot contain path separators: `{value}`")
            }
            Self::ReservedPrefix(value) => {
                write!(f, "community name cannot start with `.` or `_`: `{value}`")
            }
        }
    }
}

impl Error for CommunityNameError {}

/// Validates and normalizes a community name.
///
/// Leading/trailing whitespace is trimmed. The trimmed name becomes the
/// directory identity, so separators and the layout's reserved prefixes are
/// rejected.
pub fn normalize_community_name(raw: &str) -> Result<String, CommunityNameError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CommunityNameError::Empty);
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(CommunityNameError::ContainsSeparator(trimmed.to_string()));
    }
    if trimmed.starts_with('.') || trimmed.starts_with('_') {
        return Err(CommunityNameError::ReservedPrefix(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Metadata document persisted per community as `_metadata.json`.
///
/// Optional fields are stored as empty strings so the document always carries
/// all four keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityMetadata {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "AgeRestriction", default)]
    pub age_restriction: String,
}

impl CommunityMetadata {
    /// Creates metadata with the given name and empty optional fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            genre: String::new(),
            description: String::new(),
            age_restriction: String::new(),
        }
    }

    /// Creates metadata from optional detail fields.
    ///
    /// `None` details are persisted as empty strings.
    pub fn with_details(
        name: impl Into<String>,
        genre: Option<String>,
        description: Option<String>,
        age_restriction: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            genre: genre.unwrap_or_default(),
            description: description.unwrap_or_default(),
            age_restriction: age_restriction.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_community_name, CommunityMetadata, CommunityNameError};

    #[test]
    fn normalize_trims_and_accepts_plain_names() {
        assert_eq!(normalize_community_name(" rustlang ").unwrap(), "rustlang");
    }

    #[test]
    fn normalize_rejects_empty_and_reserved() {
        assert_eq!(
            normalize_community_name("   "),
            Err(CommunityNameError::Empty)
        );
        assert!(matches!(
            normalize_community_name(".hidden"),
            Err(CommunityNameError::ReservedPrefix(_))
        ));
        assert!(matches!(
            normalize_community_name("a/b"),
            Err(CommunityNameError::ContainsSeparator(_))
        ));
    }

    #[test]
    fn metadata_serialization_uses_capitalized_wire_keys() {
        let meta = CommunityMetadata::with_details(
            "fiction",
            Some("fantasy".to_string()),
            None,
            Some("16+".to_string()),
        );
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["Name"], "fiction");
        assert_eq!(json["Genre"], "fantasy");
        assert_eq!(json["Description"], "");
        assert_eq!(json["AgeRestriction"], "16+");
    }
}
