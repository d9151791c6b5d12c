//! Edit command interpreter.
//!
//! # Responsibility
//! - Apply an ordered command list to a line buffer, producing the new
//!   buffer.
//!
//! # Invariants
//! - Strict left fold over one mutable buffer: an index is validated against
//!   the buffer as it exists when that command executes, so earlier commands
//!   shift what later indices refer to.
//! - Out-of-range indices and malformed commands are skipped, never fatal.

use crate::model::command::EditCommand;
use log::debug;

/// Applies `commands` in order to a buffer seeded from `lines`.
///
/// Pure: returns the final buffer and persists nothing.
///
/// # Contract
/// - `Insert` always appends.
/// - `Delete`/`Replace` use 1-based indices checked against the live buffer
///   length; out-of-range commands are silently skipped.
/// - `Malformed` commands are silently skipped.
pub fn apply_commands(lines: &[String], commands: &[EditCommand]) -> Vec<String> {
    let mut buffer: Vec<String> = lines.to_vec();

    for command in commands {
        match command {
            EditCommand::Insert(text) => buffer.push(text.clone()),
            EditCommand::Delete(index) => {
                if (1..=buffer.len()).contains(index) {
                    buffer.remove(index - 1);
                } else {
                    debug!(
                        "event=command_skip module=edit reason=out_of_range command=delete index={index} len={}",
                        buffer.len()
                    );
                }
            }
            EditCommand::Replace(index, text) => {
                if (1..=buffer.len()).contains(index) {
                    buffer[index - 1] = text.clone();
                } else {
                    debug!(
                        "event=command_skip module=edit reason=out_of_range command=replace index={index} len={}",
                        buffer.len()
                    );
                }
            }
            EditCommand::Malformed(raw) => {
                debug!("event=command_skip module=edit reason=malformed raw={raw}");
            }
        }
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::apply_commands;
    use crate::model::command::EditCommand;

    fn buf(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn insert_then_delete_cancels_out() {
        let result = apply_commands(
            &[],
            &[
                EditCommand::Insert("x".to_string()),
                EditCommand::Delete(1),
            ],
        );
        assert!(result.is_empty());
    }

    #[test]
    fn delete_then_insert_skips_the_delete() {
        let result = apply_commands(
            &[],
            &[
                EditCommand::Delete(1),
                EditCommand::Insert("x".to_string()),
            ],
        );
        assert_eq!(result, buf(&["x"]));
    }

    #[test]
    fn delete_shifts_later_indices() {
        let result = apply_commands(
            &buf(&["a", "b", "c"]),
            &[
                EditCommand::Delete(1),
                EditCommand::Replace(1, "B".to_string()),
            ],
        );
        assert_eq!(result, buf(&["B", "c"]));
    }

    #[test]
    fn out_of_range_never_mutates() {
        let initial = buf(&["a", "b"]);
        let result = apply_commands(
            &initial,
            &[
                EditCommand::Delete(0),
                EditCommand::Delete(3),
                EditCommand::Replace(9, "x".to_string()),
            ],
        );
        assert_eq!(result, initial);
    }

    #[test]
    fn malformed_commands_are_skipped_without_aborting() {
        let result = apply_commands(
            &buf(&["a"]),
            &[
                EditCommand::Malformed(":delete x".to_string()),
                EditCommand::Insert("b".to_string()),
            ],
        );
        assert_eq!(result, buf(&["a", "b"]));
    }

    #[test]
    fn replace_overwrites_in_place() {
        let result = apply_commands(
            &buf(&["old", "keep"]),
            &[EditCommand::Replace(1, "new".to_string())],
        );
        assert_eq!(result, buf(&["new", "keep"]));
    }
}
