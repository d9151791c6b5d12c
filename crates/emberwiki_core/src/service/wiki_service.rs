//! Wiki use-case service.
//!
//! # Responsibility
//! - Orchestrate edit capture, macro replay, version snapshots and rendering
//!   into the operations a client calls.
//! - Enforce the snapshot brackets around every mutating flow
//!   (`edit_pre`/`edit_post`, `macro_pre`/`macro_post`, rename bracket).
//!
//! # Invariants
//! - Version history only ever grows; restore appends, never rewrites.
//! - Unknown macros and skipped commands are soft outcomes reported in the
//!   result envelopes; storage failures propagate unmasked.

use crate::edit::interpreter::apply_commands;
use crate::edit::session::{EditSession, SessionStep};
use crate::model::command::EditCommand;
use crate::model::community::CommunityMetadata;
use crate::model::page::{content_to_lines, lines_to_content, normalize_page_name};
use crate::model::version::{VersionOperation, VersionRecord};
use crate::render::actions::ActionRegistry;
use crate::render::markdown::render;
use crate::repo::community_repo::CommunityRepository;
use crate::repo::macro_repo::MacroRepository;
use crate::repo::page_repo::PageRepository;
use crate::repo::version_repo::VersionRepository;
use crate::repo::StoreError;
use crate::service::posix_export::posix_script;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

static REPLAY_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@replay (.*)$").expect("valid replay marker regex"));

pub type WikiResult<T> = Result<T, WikiServiceError>;

/// Service error for wiki use-cases.
#[derive(Debug)]
pub enum WikiServiceError {
    /// Storage-layer failure, propagated unmasked.
    Store(StoreError),
    /// Version selector outside the presented history range.
    ///
    /// Aborts only the current request; the session stays open.
    InvalidSelection { requested: usize, available: usize },
}

impl Display for WikiServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidSelection {
                requested,
                available,
            } => write!(
                f,
                "invalid version selection {requested}; {available} versions available"
            ),
        }
    }
}

impl Error for WikiServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidSelection { .. } => None,
        }
    }
}

impl From<StoreError> for WikiServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result envelope of one interactive edit.
#[derive(Debug)]
pub struct EditOutcome {
    /// Normalized page file name.
    pub page: String,
    /// Content written to the page.
    pub content: String,
    /// Version records appended by this edit, in order.
    pub versions: Vec<VersionRecord>,
    /// Names of macros recorded during the session.
    pub recorded_macros: Vec<String>,
}

/// How one replay marker was handled.
#[derive(Debug)]
pub enum ReplayStatus {
    /// Macro applied; both bracket snapshots were appended.
    Applied {
        pre: VersionRecord,
        post: VersionRecord,
    },
    /// No macro of this name exists; content and history untouched.
    UnknownMacro,
}

/// Per-marker replay report.
#[derive(Debug)]
pub struct ReplayReport {
    pub name: String,
    pub status: ReplayStatus,
}

/// Result envelope of viewing a page.
#[derive(Debug)]
pub struct ViewOutcome {
    /// Normalized page file name.
    pub page: String,
    /// Final page content after all replays.
    pub content: String,
    /// Terminal-styled rendering of `content`.
    pub rendered: String,
    /// One report per `@replay` marker, in document order.
    pub replays: Vec<ReplayReport>,
}

/// Result envelope of restoring a stored version.
#[derive(Debug)]
pub struct RestoreOutcome {
    /// The record whose artifact was restored.
    pub restored_from: VersionRecord,
    /// The `restored` record appended by this operation.
    pub appended: VersionRecord,
    /// Content written to the page.
    pub content: String,
}

/// Result envelope of renaming a page.
#[derive(Debug)]
pub struct RenameOutcome {
    pub old_page: String,
    pub new_page: String,
    /// Snapshot under the old name, before the move.
    pub rename_old: VersionRecord,
    /// Snapshot under the new name, after the move.
    pub rename_new: VersionRecord,
}

/// Presentation summary of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub name: String,
    pub size_bytes: u64,
    pub version_count: usize,
    /// Timestamp of the newest version, when history exists.
    pub last_version: Option<String>,
}

/// Use-case facade over the repository contracts.
pub struct WikiService<R> {
    repo: R,
}

impl<R> WikiService<R>
where
    R: CommunityRepository + PageRepository + MacroRepository + VersionRepository,
{
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    // --- community lifecycle -------------------------------------------

    /// Creates a community and seeds its on-disk layout.
    pub fn create_community(&self, metadata: &CommunityMetadata) -> WikiResult<()> {
        Ok(self.repo.create_community(metadata)?)
    }

    /// Deletes a community and everything under it.
    pub fn delete_community(&self, community: &str) -> WikiResult<()> {
        Ok(self.repo.delete_community(community)?)
    }

    /// Renames a community directory; metadata is carried as-is.
    pub fn rename_community(&self, old: &str, new: &str) -> WikiResult<String> {
        Ok(self.repo.rename_community(old, new)?)
    }

    /// Lists community names, sorted.
    pub fn list_communities(&self) -> WikiResult<Vec<String>> {
        Ok(self.repo.list_communities()?)
    }

    /// Reads a community's metadata document.
    pub fn read_metadata(&self, community: &str) -> WikiResult<CommunityMetadata> {
        Ok(self.repo.read_metadata(community)?)
    }

    // --- pages ---------------------------------------------------------

    /// Lists page file names within a community, sorted.
    pub fn list_pages(&self, community: &str) -> WikiResult<Vec<String>> {
        Ok(self.repo.list_pages(community)?)
    }

    /// Reads a page's stored content without triggering replays.
    pub fn read_page(&self, community: &str, page: &str) -> WikiResult<String> {
        let page = normalize_page_name(page).map_err(StoreError::from)?;
        Ok(self.repo.read_page(community, &page)?)
    }

    /// Runs one interactive edit from the given input lines.
    ///
    /// Lines route through the edit session state machine: content lines
    /// into the page buffer, `:macro`/`:endmacro` blocks into recordings.
    /// The capture ends at the sentinel or when input runs out.
    ///
    /// # Contract
    /// - An existing page is snapshotted (`edit_pre`) before any mutation.
    /// - The final buffer replaces the page content and is snapshotted
    ///   (`edit_post`).
    /// - Recorded macros overwrite same-named entries in the community's
    ///   macro document; other entries are preserved.
    pub fn edit_page<I>(&self, community: &str, page: &str, input: I) -> WikiResult<EditOutcome>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let page = normalize_page_name(page).map_err(StoreError::from)?;
        let mut versions = Vec::new();

        if self.repo.page_exists(community, &page)? {
            let current = self.repo.read_page(community, &page)?;
            versions.push(self.repo.append_version(
                community,
                &page,
                &current,
                VersionOperation::EditPre,
            )?);
        }

        let mut session = EditSession::new();
        for line in input {
            if session.feed(line.as_ref()) == SessionStep::Finished {
                break;
            }
        }
        let (buffer, recorded) = session.finish();

        let content = lines_to_content(&buffer);
        self.repo.write_page(community, &page, &content)?;
        versions.push(self.repo.append_version(
            community,
            &page,
            &content,
            VersionOperation::EditPost,
        )?);

        let recorded_macros: Vec<String> = recorded.keys().cloned().collect();
        let mut document = self.repo.load_macros(community)?;
        for (name, commands) in recorded {
            document.insert(name, commands);
        }
        self.repo.save_macros(community, &document)?;

        info!(
            "event=page_edit module=service status=ok community={community} page={page} macros_recorded={}",
            recorded_macros.len()
        );
        Ok(EditOutcome {
            page,
            content,
            versions,
            recorded_macros,
        })
    }

    /// Applies one recorded macro to a page, with the snapshot bracket.
    ///
    /// An unknown macro name is a soft outcome (`ReplayStatus::UnknownMacro`)
    /// that leaves content and history untouched.
    pub fn replay_macro(&self, community: &str, name: &str, page: &str) -> WikiResult<ReplayReport> {
        let page = normalize_page_name(page).map_err(StoreError::from)?;
        let document = self.repo.load_macros(community)?;
        let Some(raw_commands) = document.get(name) else {
            warn!(
                "event=macro_replay module=service status=skip reason=unknown_macro community={community} macro={name}"
            );
            return Ok(ReplayReport {
                name: name.to_string(),
                status: ReplayStatus::UnknownMacro,
            });
        };

        let current = self.repo.read_page(community, &page)?;
        let pre = self.repo.append_version(
            community,
            &page,
            &current,
            VersionOperation::MacroPre,
        )?;

        let commands: Vec<EditCommand> = raw_commands
            .iter()
            .map(|raw| EditCommand::parse(raw))
            .collect();
        let buffer = apply_commands(&content_to_lines(&current), &commands);

        let content = lines_to_content(&buffer);
        self.repo.write_page(community, &page, &content)?;
        let post = self.repo.append_version(
            community,
            &page,
            &content,
            VersionOperation::MacroPost,
        )?;

        info!(
            "event=macro_replay module=service status=ok community={community} macro={name} page={page} commands={}",
            commands.len()
        );
        Ok(ReplayReport {
            name: name.to_string(),
            status: ReplayStatus::Applied { pre, post },
        })
    }

    /// Loads a page for viewing: applies `@replay` markers in document
    /// order, then renders the final content.
    ///
    /// Markers apply cumulatively; each applied replay appends its
    /// `macro_pre`/`macro_post` bracket. The marker scan runs once over the
    /// stored content, so lines a replay inserts do not trigger within the
    /// same view.
    pub fn view_page(
        &self,
        community: &str,
        page: &str,
        actions: &ActionRegistry,
    ) -> WikiResult<ViewOutcome> {
        let page = normalize_page_name(page).map_err(StoreError::from)?;
        let stored = self.repo.read_page(community, &page)?;

        let mut replays = Vec::new();
        for line in stored.split('\n') {
            if let Some(caps) = REPLAY_MARKER_RE.captures(line) {
                let name = caps[1].trim().to_string();
                replays.push(self.replay_macro(community, &name, &page)?);
            }
        }

        let content = self.repo.read_page(community, &page)?;
        let rendered = render(&content, actions);
        Ok(ViewOutcome {
            page,
            content,
            rendered,
            replays,
        })
    }

    // --- version history -----------------------------------------------

    /// Returns a page's version history, oldest first.
    pub fn list_versions(&self, community: &str, page: &str) -> WikiResult<Vec<VersionRecord>> {
        let page = normalize_page_name(page).map_err(StoreError::from)?;
        Ok(self.repo.list_versions(community, &page)?)
    }

    /// Restores a stored version selected from the newest-first listing
    /// (1-based), appending exactly one `restored` record.
    pub fn restore_version(
        &self,
        community: &str,
        page: &str,
        selector: usize,
    ) -> WikiResult<RestoreOutcome> {
        let page = normalize_page_name(page).map_err(StoreError::from)?;
        let records = self.repo.list_versions(community, &page)?;
        if selector == 0 || selector > records.len() {
            return Err(WikiServiceError::InvalidSelection {
                requested: selector,
                available: records.len(),
            });
        }

        let restored_from = records[records.len() - selector].clone();
        let content = self.repo.read_artifact(community, &page, &restored_from)?;
        self.repo.write_page(community, &page, &content)?;
        let appended = self.repo.append_version(
            community,
            &page,
            &content,
            VersionOperation::Restored,
        )?;

        info!(
            "event=version_restore module=service status=ok community={community} page={page} from={}",
            restored_from.version_file
        );
        Ok(RestoreOutcome {
            restored_from,
            appended,
            content,
        })
    }

    /// Renames a page, bracketing the move with `rename_old`/`rename_new`
    /// snapshots. History under the old name stays where it is.
    pub fn rename_page(&self, community: &str, old: &str, new: &str) -> WikiResult<RenameOutcome> {
        let old_page = normalize_page_name(old).map_err(StoreError::from)?;
        let new_page = normalize_page_name(new).map_err(StoreError::from)?;

        let content = self.repo.read_page(community, &old_page)?;
        let rename_old = self.repo.append_version(
            community,
            &old_page,
            &content,
            VersionOperation::RenameOld,
        )?;
        self.repo.rename_page_file(community, &old_page, &new_page)?;
        let rename_new = self.repo.append_version(
            community,
            &new_page,
            &content,
            VersionOperation::RenameNew,
        )?;

        info!(
            "event=page_rename module=service status=ok community={community} from={old_page} to={new_page}"
        );
        Ok(RenameOutcome {
            old_page,
            new_page,
            rename_old,
            rename_new,
        })
    }

    /// Returns a page's presentation summary.
    pub fn page_info(&self, community: &str, page: &str) -> WikiResult<PageInfo> {
        let page = normalize_page_name(page).map_err(StoreError::from)?;
        let size_bytes = self.repo.page_size(community, &page)?;
        let records = self.repo.list_versions(community, &page)?;
        Ok(PageInfo {
            name: page,
            size_bytes,
            version_count: records.len(),
            last_version: records.last().map(|record| record.timestamp.clone()),
        })
    }

    // --- export --------------------------------------------------------

    /// Writes an interactive POSIX page browser next to the community
    /// directories and returns its path.
    pub fn export_posix(&self, community: &str) -> WikiResult<PathBuf> {
        let metadata = self.repo.read_metadata(community)?;
        let pages = self.repo.list_pages(community)?;
        let script = posix_script(community, &metadata, &pages);
        Ok(self.repo.write_export_script(community, &script)?)
    }
}
