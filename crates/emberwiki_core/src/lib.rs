//! Core domain logic for EmberWiki.
//!
//! A file-backed wiki: plaintext pages organized into community
//! directories, edited through an interactive capture session with macro
//! recording, versioned by an append-only snapshot log, and rendered for
//! the terminal by a line-oriented markdown dialect.
//!
//! This crate is the single source of truth for business invariants; the
//! CLI crate owns prompts and terminal I/O only.

pub mod edit;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use edit::interpreter::apply_commands;
pub use edit::session::{EditSession, EditState, SessionStep, CONTENT_SENTINEL};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::command::EditCommand;
pub use model::community::{normalize_community_name, CommunityMetadata, CommunityNameError};
pub use model::page::{
    content_to_lines, lines_to_content, normalize_page_name, PageNameError, PAGE_SUFFIX,
};
pub use model::version::{content_fingerprint, VersionOperation, VersionRecord};
pub use render::actions::ActionRegistry;
pub use render::markdown::render;
pub use repo::community_repo::CommunityRepository;
pub use repo::fs::FsWikiRepository;
pub use repo::macro_repo::{MacroDocument, MacroRepository};
pub use repo::page_repo::PageRepository;
pub use repo::version_repo::VersionRepository;
pub use repo::{StoreError, StoreResult};
pub use service::posix_export::posix_script;
pub use service::wiki_service::{
    EditOutcome, PageInfo, RenameOutcome, ReplayReport, ReplayStatus, RestoreOutcome,
    ViewOutcome, WikiResult, WikiService, WikiServiceError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
