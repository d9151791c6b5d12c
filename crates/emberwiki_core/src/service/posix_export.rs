//! POSIX shell export of a community.
//!
//! # Responsibility
//! - Generate a self-contained `sh` script that lists a community's pages
//!   and cats a selected one.
//!
//! # Invariants
//! - The script is pure text derived from metadata and the page list; the
//!   service layer owns writing it and setting the executable bit.
//! - Page paths in the script are relative to the wiki root, so it runs
//!   from there.

use crate::model::community::CommunityMetadata;

/// Renders the interactive page-browser script for one community.
pub fn posix_script(community: &str, metadata: &CommunityMetadata, pages: &[String]) -> String {
    let mut script = String::new();
    script.push_str("#!/bin/sh\n");
    script.push_str(&format!("echo \"Community: {}\"\n", metadata.name));
    script.push_str(&format!("echo \"Genre: {}\"\n", metadata.genre));
    script.push_str(&format!("echo \"Description: {}\"\n", metadata.description));
    script.push_str(&format!(
        "echo \"Age Restriction: {}\"\n",
        metadata.age_restriction
    ));
    script.push_str("echo \"\"\n");
    script.push_str("echo \"Pages:\"\n");
    for (index, page) in pages.iter().enumerate() {
        script.push_str(&format!("echo \"{}. {page}\"\n", index + 1));
    }
    script.push_str("read -p \"Select page number: \" pg\n");
    script.push_str("case $pg in\n");
    for (index, page) in pages.iter().enumerate() {
        script.push_str(&format!(
            "{}) echo \"--- {page} ---\"; cat .{community}/{page} ;;\n",
            index + 1
        ));
    }
    script.push_str("*) echo \"Invalid selection\";; esac\n");
    script
}

#[cfg(test)]
mod tests {
    use super::posix_script;
    use crate::model::community::CommunityMetadata;

    #[test]
    fn script_lists_pages_and_dispatches_on_selection() {
        let metadata = CommunityMetadata::with_details(
            "fiction",
            Some("fantasy".to_string()),
            None,
            None,
        );
        let pages = vec!["intro.md".to_string(), "lore.md".to_string()];
        let script = posix_script("fiction", &metadata, &pages);

        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("echo \"Community: fiction\""));
        assert!(script.contains("echo \"Genre: fantasy\""));
        assert!(script.contains("echo \"1. intro.md\""));
        assert!(script.contains("echo \"2. lore.md\""));
        assert!(script.contains("2) echo \"--- lore.md ---\"; cat .fiction/lore.md ;;"));
        assert!(script.contains("*) echo \"Invalid selection\";; esac"));
    }

    #[test]
    fn script_for_empty_community_still_prompts() {
        let metadata = CommunityMetadata::new("empty");
        let script = posix_script("empty", &metadata, &[]);
        assert!(script.contains("read -p \"Select page number: \" pg"));
        assert!(script.contains("case $pg in"));
    }
}
