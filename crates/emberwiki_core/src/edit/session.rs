//! Interactive edit session state machine.
//!
//! # Responsibility
//! - Route raw input lines into the page content buffer or an in-progress
//!   macro recording.
//! - Accumulate recorded macros for the service layer to persist.
//!
//! # Invariants
//! - Two states only: capturing content, or recording one named macro.
//! - Starting a recording resets that name's command list (overwrite
//!   semantics, never append-to-existing).
//! - The sentinel ends the session only while capturing content; while
//!   recording, every non-`:endmacro` line is captured verbatim.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Line that ends the capture session.
pub const CONTENT_SENTINEL: &str = "---";

/// Line that ends a macro recording.
const END_MACRO_DIRECTIVE: &str = ":endmacro";

static MACRO_DIRECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:macro (.*)$").expect("valid macro directive regex"));

/// Session state: what the next input line will be routed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    /// Lines append to the page content buffer.
    CapturingContent,
    /// Lines append verbatim to the named macro's command list.
    RecordingMacro(String),
}

/// Result of feeding one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// Session expects more input.
    Continue,
    /// Sentinel reached; finalize via `finish`.
    Finished,
}

/// Push-based capture of one interactive edit.
///
/// The session owns no I/O: callers feed raw lines and finalize with
/// `finish`; persistence and version snapshots stay in the service layer.
#[derive(Debug)]
pub struct EditSession {
    state: EditState,
    content: Vec<String>,
    recorded: BTreeMap<String, Vec<String>>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            state: EditState::CapturingContent,
            content: Vec::new(),
            recorded: BTreeMap::new(),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Routes one raw input line.
    pub fn feed(&mut self, line: &str) -> SessionStep {
        match &self.state {
            EditState::CapturingContent => {
                if line.trim() == CONTENT_SENTINEL {
                    return SessionStep::Finished;
                }
                if let Some(caps) = MACRO_DIRECTIVE_RE.captures(line) {
                    let name = caps[1].trim().to_string();
                    self.recorded.insert(name.clone(), Vec::new());
                    self.state = EditState::RecordingMacro(name);
                    return SessionStep::Continue;
                }
                self.content.push(line.to_string());
                SessionStep::Continue
            }
            EditState::RecordingMacro(name) => {
                if line.trim() == END_MACRO_DIRECTIVE {
                    self.state = EditState::CapturingContent;
                    return SessionStep::Continue;
                }
                let name = name.clone();
                self.recorded.entry(name).or_default().push(line.to_string());
                SessionStep::Continue
            }
        }
    }

    /// Finalizes the session, yielding the content buffer and the macros
    /// recorded during it (name -> raw command lines).
    pub fn finish(self) -> (Vec<String>, BTreeMap<String, Vec<String>>) {
        (self.content, self.recorded)
    }
}
