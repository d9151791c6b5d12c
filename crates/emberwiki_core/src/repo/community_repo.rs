//! Community repository contract and filesystem implementation.
//!
//! # Responsibility
//! - Provide community lifecycle APIs (create/list/rename/delete) and
//!   metadata access.
//! - Seed the per-community layout on creation.
//!
//! # Invariants
//! - Creation writes metadata and seeds an empty macro document and the
//!   versions directory, so later loads never special-case a fresh
//!   community.
//! - Rename moves the directory only; metadata content is untouched.

use crate::model::community::{normalize_community_name, CommunityMetadata};
use crate::repo::fs::{FsWikiRepository, COMMUNITY_PREFIX};
use crate::repo::{StoreError, StoreResult};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Repository interface for community lifecycle and metadata.
pub trait CommunityRepository {
    fn list_communities(&self) -> StoreResult<Vec<String>>;
    fn community_exists(&self, community: &str) -> bool;
    fn create_community(&self, metadata: &CommunityMetadata) -> StoreResult<()>;
    fn delete_community(&self, community: &str) -> StoreResult<()>;
    fn rename_community(&self, old: &str, new: &str) -> StoreResult<String>;
    fn read_metadata(&self, community: &str) -> StoreResult<CommunityMetadata>;
    /// Writes an export script next to the community directories.
    fn write_export_script(&self, community: &str, script: &str) -> StoreResult<PathBuf>;
}

impl CommunityRepository for FsWikiRepository {
    fn list_communities(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.root())? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some(stripped) = name.strip_prefix(COMMUNITY_PREFIX) {
                if !stripped.is_empty() {
                    names.push(stripped.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn community_exists(&self, community: &str) -> bool {
        self.community_dir(community).is_dir()
    }

    fn create_community(&self, metadata: &CommunityMetadata) -> StoreResult<()> {
        let name = normalize_community_name(&metadata.name)?;
        let dir = self.community_dir(&name);
        fs::create_dir_all(&dir)?;

        let metadata_json = serde_json::to_string(metadata)?;
        fs::write(self.metadata_path(&name), metadata_json)?;

        // Seed the macro document only when absent so re-creating a
        // community never wipes recorded macros.
        let macro_doc = self.macro_doc_path(&name);
        if !macro_doc.exists() {
            fs::write(macro_doc, "{}")?;
        }
        fs::create_dir_all(self.versions_dir(&name))?;

        info!("event=community_create module=repo status=ok community={name}");
        Ok(())
    }

    fn delete_community(&self, community: &str) -> StoreResult<()> {
        let dir = self.existing_community_dir(community)?;
        fs::remove_dir_all(dir)?;
        info!("event=community_delete module=repo status=ok community={community}");
        Ok(())
    }

    fn rename_community(&self, old: &str, new: &str) -> StoreResult<String> {
        let old_dir = self.existing_community_dir(old)?;
        let new_name = normalize_community_name(new)?;
        fs::rename(old_dir, self.community_dir(&new_name))?;
        info!("event=community_rename module=repo status=ok from={old} to={new_name}");
        Ok(new_name)
    }

    fn read_metadata(&self, community: &str) -> StoreResult<CommunityMetadata> {
        self.existing_community_dir(community)?;
        let path = self.metadata_path(community);
        if !path.is_file() {
            // A community created out-of-band may lack the document; fall
            // back to name-only metadata instead of failing the read.
            return Ok(CommunityMetadata::new(community));
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_export_script(&self, community: &str, script: &str) -> StoreResult<PathBuf> {
        if !self.community_exists(community) {
            return Err(StoreError::CommunityNotFound(community.to_string()));
        }
        let path = self.root().join(format!("{community}.sh"));
        fs::write(&path, script)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        }
        info!("event=posix_export module=repo status=ok community={community}");
        Ok(path)
    }
}
