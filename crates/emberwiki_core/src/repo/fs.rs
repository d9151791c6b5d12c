//! Filesystem layout of a wiki root.
//!
//! # Responsibility
//! - Hold the wiki root handle shared by all repository implementations.
//! - Derive every path of the per-community layout in one place.
//!
//! # Invariants
//! - A community named `n` lives in the hidden directory `.n` under the root.
//! - Bookkeeping files (`_metadata.json`, `_edit_macros.json`, `_versions/`)
//!   start with `_` and are never listed as pages.

use crate::repo::{StoreError, StoreResult};
use std::path::{Path, PathBuf};

pub(crate) const COMMUNITY_PREFIX: char = '.';
pub(crate) const METADATA_FILE: &str = "_metadata.json";
pub(crate) const MACRO_DOC_FILE: &str = "_edit_macros.json";
pub(crate) const VERSIONS_DIR: &str = "_versions";
pub(crate) const VERSION_LOG_FILE: &str = "_version_log.json";

/// Filesystem-backed wiki repository rooted at one directory.
///
/// Implements every repository contract of this crate; all file and JSON
/// document access goes through the path helpers below.
pub struct FsWikiRepository {
    root: PathBuf,
}

impl FsWikiRepository {
    /// Creates a repository over an existing root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the wiki root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn community_dir(&self, community: &str) -> PathBuf {
        self.root.join(format!("{COMMUNITY_PREFIX}{community}"))
    }

    /// Resolves the community directory, failing when it does not exist.
    pub(crate) fn existing_community_dir(&self, community: &str) -> StoreResult<PathBuf> {
        let dir = self.community_dir(community);
        if !dir.is_dir() {
            return Err(StoreError::CommunityNotFound(community.to_string()));
        }
        Ok(dir)
    }

    pub(crate) fn metadata_path(&self, community: &str) -> PathBuf {
        self.community_dir(community).join(METADATA_FILE)
    }

    pub(crate) fn macro_doc_path(&self, community: &str) -> PathBuf {
        self.community_dir(community).join(MACRO_DOC_FILE)
    }

    pub(crate) fn versions_dir(&self, community: &str) -> PathBuf {
        self.community_dir(community).join(VERSIONS_DIR)
    }

    pub(crate) fn version_log_path(&self, community: &str) -> PathBuf {
        self.versions_dir(community).join(VERSION_LOG_FILE)
    }

    pub(crate) fn artifact_dir(&self, community: &str, page: &str) -> PathBuf {
        self.versions_dir(community).join(page)
    }

    pub(crate) fn page_path(&self, community: &str, page: &str) -> PathBuf {
        self.community_dir(community).join(page)
    }
}
