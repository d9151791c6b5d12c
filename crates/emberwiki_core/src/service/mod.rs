//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository, session, interpreter and renderer calls into
//!   use-case level APIs.
//! - Keep terminal/menu glue decoupled from storage and rendering details.

pub mod posix_export;
pub mod wiki_service;
