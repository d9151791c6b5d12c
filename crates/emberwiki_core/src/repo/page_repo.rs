//! Page repository contract and filesystem implementation.
//!
//! # Responsibility
//! - Provide page file access within one community.
//! - Keep the page/bookkeeping distinction (`.md` vs `_` prefix) out of
//!   callers.
//!
//! # Invariants
//! - Listed pages are exactly the `.md` files not starting with `_`, sorted.
//! - Reads of a missing page return `PageNotFound`, never empty content.

use crate::model::page::PAGE_SUFFIX;
use crate::repo::fs::FsWikiRepository;
use crate::repo::{StoreError, StoreResult};
use std::fs;

/// Repository interface for page content access.
pub trait PageRepository {
    fn list_pages(&self, community: &str) -> StoreResult<Vec<String>>;
    fn page_exists(&self, community: &str, page: &str) -> StoreResult<bool>;
    fn read_page(&self, community: &str, page: &str) -> StoreResult<String>;
    fn write_page(&self, community: &str, page: &str, content: &str) -> StoreResult<()>;
    fn rename_page_file(&self, community: &str, old: &str, new: &str) -> StoreResult<()>;
    fn page_size(&self, community: &str, page: &str) -> StoreResult<u64>;
}

impl PageRepository for FsWikiRepository {
    fn list_pages(&self, community: &str) -> StoreResult<Vec<String>> {
        let dir = self.existing_community_dir(community)?;
        let mut pages = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if name.ends_with(PAGE_SUFFIX) && !name.starts_with('_') {
                pages.push(name.to_string());
            }
        }
        pages.sort();
        Ok(pages)
    }

    fn page_exists(&self, community: &str, page: &str) -> StoreResult<bool> {
        self.existing_community_dir(community)?;
        Ok(self.page_path(community, page).is_file())
    }

    fn read_page(&self, community: &str, page: &str) -> StoreResult<String> {
        self.existing_community_dir(community)?;
        let path = self.page_path(community, page);
        if !path.is_file() {
            return Err(StoreError::PageNotFound {
                community: community.to_string(),
                page: page.to_string(),
            });
        }
        Ok(fs::read_to_string(path)?)
    }

    fn write_page(&self, community: &str, page: &str, content: &str) -> StoreResult<()> {
        self.existing_community_dir(community)?;
        fs::write(self.page_path(community, page), content)?;
        Ok(())
    }

    fn rename_page_file(&self, community: &str, old: &str, new: &str) -> StoreResult<()> {
        self.existing_community_dir(community)?;
        let old_path = self.page_path(community, old);
        if !old_path.is_file() {
            return Err(StoreError::PageNotFound {
                community: community.to_string(),
                page: old.to_string(),
            });
        }
        fs::rename(old_path, self.page_path(community, new))?;
        Ok(())
    }

    fn page_size(&self, community: &str, page: &str) -> StoreResult<u64> {
        self.existing_community_dir(community)?;
        let path = self.page_path(community, page);
        if !path.is_file() {
            return Err(StoreError::PageNotFound {
                community: community.to_string(),
                page: page.to_string(),
            });
        }
        Ok(fs::metadata(path)?.len())
    }
}
