//! Line-oriented markdown renderer for terminal display.
//!
//! # Responsibility
//! - Classify each content line (first match wins) and apply terminal
//!   styling.
//! - Run registered `@macro` actions encountered during rendering.
//!
//! # Invariants
//! - Rendering is total: unrecognized input passes through with default
//!   styling, and malformed markup never fails the call.
//! - Inside a code fence no other classification applies.
//! - Bold/italic markers are a literal, order-sensitive substitution
//!   (`**` first, then `*`), not a balanced parser; nested or overlapping
//!   markers keep their substitution-order output.

use crate::render::actions::ActionRegistry;
use colored::Colorize;

// Open/close toggles for the literal bold/italic substitution. The line
// styles above go through `colored`, but substitution produces unbalanced
// SGR toggles by contract, which a wrapper API cannot express.
const BOLD_ON: &str = "\x1b[1m";
const ITALIC_ON: &str = "\x1b[3m";
const STYLE_RESET: &str = "\x1b[0m";

const RULE_WIDTH: usize = 40;
const RULE_GLYPH: char = '─';

const SOLID_BULLET: &str = "• ";
const HOLLOW_BULLET: &str = "◦ ";

/// Renders page content for terminal display, one line at a time.
///
/// Total and deterministic for a given registry and color configuration
/// (line-level colors honor `colored`'s global controls).
///
/// # Side effects
/// - An `@macro <name>` line whose name is present in `actions` runs that
///   zero-argument action during rendering. Callers that need a pure render
///   must pass `ActionRegistry::empty()` or keep `@macro` lines out of the
///   input.
pub fn render(content: &str, actions: &ActionRegistry) -> String {
    let mut rendered: Vec<String> = Vec::new();
    let mut in_code_block = false;
    let mut in_list = false;

    for line in content.split('\n') {
        // Fence lines toggle the block and render as code themselves.
        if line.trim().starts_with("```") {
            in_code_block = !in_code_block;
            rendered.push(line.white().on_black().to_string());
            continue;
        }
        if in_code_block {
            rendered.push(line.white().on_black().to_string());
            continue;
        }

        if let Some(rest) = line.strip_prefix("# ") {
            rendered.push(rest.bold().blue().to_string());
        } else if let Some(rest) = line.strip_prefix("## ") {
            rendered.push(rest.bold().cyan().to_string());
        } else if let Some(rest) = line.strip_prefix("### ") {
            rendered.push(rest.bold().green().to_string());
        } else if line.starts_with("- ") || line.starts_with("* ") {
            in_list = true;
            let bullet = if line.starts_with("- ") {
                SOLID_BULLET
            } else {
                HOLLOW_BULLET
            };
            rendered.push(format!("{bullet}{}", &line[2..]).yellow().to_string());
        } else if line.starts_with("> ") {
            rendered.push(line.magenta().to_string());
        } else if line.contains('`') {
            let mut styled = String::new();
            for (index, segment) in line.split('`').enumerate() {
                if index % 2 == 1 {
                    styled.push_str(&segment.white().on_black().to_string());
                } else {
                    styled.push_str(&substitute_emphasis(segment));
                }
            }
            rendered.push(styled);
        } else if let Some(rest) = line.strip_prefix("@macro ") {
            let name = rest.trim();
            rendered.push(format!("[Macro: {name}]").bold().magenta().to_string());
            actions.run(name);
        } else if let Some(rest) = line.strip_prefix("@replay ") {
            // Marker only; replay itself happens before rendering, in the
            // view flow.
            rendered.push(format!("[Edit Macro: {rest}]").bold().cyan().to_string());
        } else if let Some(rest) = line.strip_prefix("#tag ") {
            rendered.push(format!("[Tag: {rest}]").bold().yellow().to_string());
        } else if matches!(line.trim(), "---" | "***" | "___") {
            let rule: String = std::iter::repeat(RULE_GLYPH).take(RULE_WIDTH).collect();
            rendered.push(rule.cyan().to_string());
        } else {
            if line.trim().is_empty() && in_list {
                in_list = false;
            }
            rendered.push(substitute_emphasis(line));
        }
    }

    rendered.join("\n")
}

/// Literal bold/italic substitution: `**` then `*`, reset appended.
fn substitute_emphasis(text: &str) -> String {
    let mut out = text.replace("**", BOLD_ON).replace('*', ITALIC_ON);
    out.push_str(STYLE_RESET);
    out
}
