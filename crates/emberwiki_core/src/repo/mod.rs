//! Repository layer abstractions and filesystem persistence.
//!
//! # Responsibility
//! - Define use-case oriented storage contracts for communities, pages,
//!   macros and version history.
//! - Isolate directory layout and JSON document details from service
//!   orchestration.
//!
//! # Invariants
//! - Repository writes validate names before touching the filesystem.
//! - Repository APIs return semantic errors (`PageNotFound`) in addition to
//!   transport errors, and never mask storage failures.

use crate::model::community::CommunityNameError;
use crate::model::page::PageNameError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod community_repo;
pub mod fs;
pub mod macro_repo;
pub mod page_repo;
pub mod version_repo;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error shared by all repository contracts.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying filesystem failure; propagated unmasked.
    Io(std::io::Error),
    /// Persisted document could not be encoded or decoded.
    Json(serde_json::Error),
    /// Community name failed validation.
    InvalidCommunity(CommunityNameError),
    /// Page name failed validation.
    InvalidPage(PageNameError),
    /// Community directory does not exist.
    CommunityNotFound(String),
    /// Page file does not exist within the community.
    PageNotFound { community: String, page: String },
    /// Version index references an artifact file that is missing on disk.
    ///
    /// Recoverable: callers report it and keep the session open.
    ArtifactMissing { page: String, version_file: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::InvalidCommunity(err) => write!(f, "{err}"),
            Self::InvalidPage(err) => write!(f, "{err}"),
            Self::CommunityNotFound(name) => write!(f, "community not found: {name}"),
            Self::PageNotFound { community, page } => {
                write!(f, "page not found: {page} in community {community}")
            }
            Self::ArtifactMissing { page, version_file } => {
                write!(f, "version artifact missing for {page}: {version_file}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidCommunity(err) => Some(err),
            Self::InvalidPage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<CommunityNameError> for StoreError {
    fn from(value: CommunityNameError) -> Self {
        Self::InvalidCommunity(value)
    }
}

impl From<PageNameError> for StoreError {
    fn from(value: PageNameError) -> Self {
        Self::InvalidPage(value)
    }
}
