//! Edit commands recorded into macros.
//!
//! # Responsibility
//! - Define the tagged command variant applied by the macro interpreter.
//! - Parse raw recorded command lines lazily, at replay time.
//!
//! # Invariants
//! - Parsing is total: unrecognized input becomes `Malformed`, never an
//!   error.
//! - Indices are 1-based; range validation belongs to the interpreter, which
//!   checks against the live buffer at execution time.

/// One atomic page mutation recorded into a macro.
///
/// Commands are persisted as raw text and parsed only when a macro is
/// replayed, so a recording session never rejects input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Append a line to the end of the buffer.
    Insert(String),
    /// Remove the line at a 1-based index.
    Delete(usize),
    /// Overwrite the line at a 1-based index.
    Replace(usize, String),
    /// Unrecognized raw input, skipped silently during replay.
    Malformed(String),
}

impl EditCommand {
    /// Parses one recorded command line.
    ///
    /// Raw syntax: `:insert <text>` (text trimmed), `:delete <n>`,
    /// `:replace <n> <text>` (text kept verbatim after the first space).
    /// Anything else, including non-numeric indices, parses as `Malformed`.
    pub fn parse(raw: &str) -> EditCommand {
        if let Some(rest) = raw.strip_prefix(":insert ") {
            return EditCommand::Insert(rest.trim().to_string());
        }
        if let Some(rest) = raw.strip_prefix(":delete ") {
            return match rest.trim().parse::<usize>() {
                Ok(index) => EditCommand::Delete(index),
                Err(_) => EditCommand::Malformed(raw.to_string()),
            };
        }
        if let Some(rest) = raw.strip_prefix(":replace ") {
            if let Some((index_text, text)) = rest.trim().split_once(' ') {
                if let Ok(index) = index_text.parse::<usize>() {
                    return EditCommand::Replace(index, text.to_string());
                }
            }
            return EditCommand::Malformed(raw.to_string());
        }
        EditCommand::Malformed(raw.to_string())
    }
}
