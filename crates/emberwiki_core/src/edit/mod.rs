//! Macro-driven text editing pipeline.
//!
//! # Responsibility
//! - Apply recorded edit commands to a page's line buffer (interpreter).
//! - Capture interactive input into content and macro recordings (session).
//!
//! # Invariants
//! - The interpreter is pure; persistence belongs to the service layer.
//! - Command application order matches recording order exactly.

pub mod interpreter;
pub mod session;
