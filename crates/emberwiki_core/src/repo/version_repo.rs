//! Version log repository contract and filesystem implementation.
//!
//! # Responsibility
//! - Append immutable content snapshots and their index records.
//! - Read back history sequences and stored artifacts.
//!
//! # Invariants
//! - The index (`_version_log.json`) is append-only per page, oldest first;
//!   entries are never removed or reordered.
//! - The artifact is written before the index record. An interruption
//!   between the two leaves an unindexed artifact, which is an accepted gap.

use crate::model::version::{VersionOperation, VersionRecord, TIMESTAMP_FORMAT};
use crate::repo::fs::FsWikiRepository;
use crate::repo::{StoreError, StoreResult};
use chrono::Local;
use log::info;
use std::collections::BTreeMap;
use std::fs;

/// Version index document: page name -> ordered records, oldest first.
pub type VersionIndex = BTreeMap<String, Vec<VersionRecord>>;

/// Repository interface for version history.
pub trait VersionRepository {
    /// Snapshots `content` for `page`, returning the appended record.
    fn append_version(
        &self,
        community: &str,
        page: &str,
        content: &str,
        operation: VersionOperation,
    ) -> StoreResult<VersionRecord>;

    /// Returns the page's history, oldest first; no history -> empty.
    fn list_versions(&self, community: &str, page: &str) -> StoreResult<Vec<VersionRecord>>;

    /// Reads the immutable artifact content behind a record.
    fn read_artifact(
        &self,
        community: &str,
        page: &str,
        record: &VersionRecord,
    ) -> StoreResult<String>;
}

impl FsWikiRepository {
    fn load_version_index(&self, community: &str) -> StoreResult<VersionIndex> {
        let path = self.version_log_path(community);
        if !path.is_file() {
            return Ok(VersionIndex::new());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save_version_index(&self, community: &str, index: &VersionIndex) -> StoreResult<()> {
        fs::create_dir_all(self.versions_dir(community))?;
        let encoded = serde_json::to_string_pretty(index)?;
        fs::write(self.version_log_path(community), encoded)?;
        Ok(())
    }
}

impl VersionRepository for FsWikiRepository {
    fn append_version(
        &self,
        community: &str,
        page: &str,
        content: &str,
        operation: VersionOperation,
    ) -> StoreResult<VersionRecord> {
        self.existing_community_dir(community)?;

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let record = VersionRecord::new(timestamp, content, operation);

        // Artifact first, index second; the log may lag a landed artifact
        // after an interruption but never points at a missing one it could
        // have avoided.
        let artifact_dir = self.artifact_dir(community, page);
        fs::create_dir_all(&artifact_dir)?;
        fs::write(artifact_dir.join(&record.version_file), content)?;

        let mut index = self.load_version_index(community)?;
        index.entry(page.to_string()).or_default().push(record.clone());
        self.save_version_index(community, &index)?;

        info!(
            "event=version_append module=repo status=ok community={community} page={page} operation={} hash={}",
            record.operation, record.hash
        );
        Ok(record)
    }

    fn list_versions(&self, community: &str, page: &str) -> StoreResult<Vec<VersionRecord>> {
        self.existing_community_dir(community)?;
        let index = self.load_version_index(community)?;
        Ok(index.get(page).cloned().unwrap_or_default())
    }

    fn read_artifact(
        &self,
        community: &str,
        page: &str,
        record: &VersionRecord,
    ) -> StoreResult<String> {
        self.existing_community_dir(community)?;
        let path = self
            .artifact_dir(community, page)
            .join(&record.version_file);
        if !path.is_file() {
            return Err(StoreError::ArtifactMissing {
                page: page.to_string(),
                version_file: record.version_file.clone(),
            });
        }
        Ok(fs::read_to_string(path)?)
    }
}
