//! Version snapshots and their wire format.
//!
//! # Responsibility
//! - Define the operation labels and the record shape of the version index.
//! - Derive content fingerprints and artifact file names.
//!
//! # Invariants
//! - Records never mutate once appended; history is ordered oldest first.
//! - An artifact is addressed by `(timestamp, fingerprint, operation)` and
//!   its file name is derived from exactly those three parts.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{Display, Formatter};

/// Timestamp format used in version records and artifact file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Number of hex characters kept from the content digest.
const FINGERPRINT_LEN: usize = 8;

/// Operation that produced a version snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionOperation {
    /// Snapshot of existing content before an interactive edit.
    EditPre,
    /// Snapshot of the buffer written by an interactive edit.
    EditPost,
    /// Snapshot of current content before a macro replay.
    MacroPre,
    /// Snapshot of the buffer written by a macro replay.
    MacroPost,
    /// Snapshot appended when a stored version is restored.
    Restored,
    /// Snapshot of a page under its old name before a rename.
    RenameOld,
    /// Snapshot of a page under its new name after a rename.
    RenameNew,
}

impl VersionOperation {
    /// Returns the snake_case label used on the wire and in artifact names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EditPre => "edit_pre",
            Self::EditPost => "edit_post",
            Self::MacroPre => "macro_pre",
            Self::MacroPost => "macro_post",
            Self::Restored => "restored",
            Self::RenameOld => "rename_old",
            Self::RenameNew => "rename_new",
        }
    }
}

impl Display for VersionOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a page's version history.
///
/// Wire keys are fixed: `timestamp`, `hash`, `operation`, `version_file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Local time the snapshot was taken, formatted `%Y%m%d_%H%M%S`.
    pub timestamp: String,
    /// Short content fingerprint, 8 lowercase hex chars.
    pub hash: String,
    /// Operation that produced the snapshot.
    pub operation: VersionOperation,
    /// Artifact file name under the page's version directory.
    pub version_file: String,
}

impl VersionRecord {
    /// Builds a record for `content` snapshotted at `timestamp`.
    pub fn new(timestamp: impl Into<String>, content: &str, operation: VersionOperation) -> Self {
        let timestamp = timestamp.into();
        let hash = content_fingerprint(content);
        let version_file = artifact_file_name(&timestamp, &hash, operation);
        Self {
            timestamp,
            hash,
            operation,
            version_file,
        }
    }
}

/// Returns the short deterministic fingerprint of `content`.
///
/// First 8 hex chars of the SHA-256 digest; collisions at this length are
/// tolerable because the timestamp and operation disambiguate artifacts.
pub fn content_fingerprint(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let mut out = String::with_capacity(FINGERPRINT_LEN);
    for byte in digest.iter().take(FINGERPRINT_LEN / 2) {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Derives the artifact file name for a snapshot.
pub fn artifact_file_name(timestamp: &str, hash: &str, operation: VersionOperation) -> String {
    format!("{timestamp}_{hash}_{operation}.md")
}
