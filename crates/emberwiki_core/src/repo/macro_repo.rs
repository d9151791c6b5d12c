//! Macro document repository contract and filesystem implementation.
//!
//! # Responsibility
//! - Load and persist the per-community macro document
//!   (`_edit_macros.json`): macro name -> ordered raw command lines.
//!
//! # Invariants
//! - Commands are stored verbatim; parsing happens at replay time.
//! - The whole document is written back after a recording session, so a
//!   re-recorded name fully replaces its prior command list.

use crate::repo::fs::FsWikiRepository;
use crate::repo::StoreResult;
use std::collections::BTreeMap;
use std::fs;

/// Per-community macro document: name -> ordered raw command lines.
pub type MacroDocument = BTreeMap<String, Vec<String>>;

/// Repository interface for the macro document.
pub trait MacroRepository {
    /// Loads the community's macro document; absent document -> empty map.
    fn load_macros(&self, community: &str) -> StoreResult<MacroDocument>;
    /// Persists the full macro document, replacing the stored one.
    fn save_macros(&self, community: &str, macros: &MacroDocument) -> StoreResult<()>;
}

impl MacroRepository for FsWikiRepository {
    fn load_macros(&self, community: &str) -> StoreResult<MacroDocument> {
        self.existing_community_dir(community)?;
        let path = self.macro_doc_path(community);
        if !path.is_file() {
            return Ok(MacroDocument::new());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save_macros(&self, community: &str, macros: &MacroDocument) -> StoreResult<()> {
        self.existing_community_dir(community)?;
        let encoded = serde_json::to_string(macros)?;
        fs::write(self.macro_doc_path(community), encoded)?;
        Ok(())
    }
}
