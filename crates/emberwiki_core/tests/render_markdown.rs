use emberwiki_core::{render, ActionRegistry};

#[test]
fn heading_and_bullets_render_with_expected_shapes() {
    let out = render("# Title\n- a\n- b\n", &ActionRegistry::empty());
    let lines: Vec<&str> = out.split('\n').collect();

    assert!(lines[0].contains("Title") && !lines[0].contains("# "));
    assert!(lines[1].contains("• a"));
    assert!(lines[2].contains("• b"));
    // Trailing newline in content yields a trailing (empty) rendered line.
    assert_eq!(lines.len(), 4);
}

#[test]
fn rendering_is_independent_of_macro_state() {
    let content = "# Title\n- a\n- b\n";
    let plain = render(content, &ActionRegistry::empty());
    let with_builtins = render(content, &ActionRegistry::builtin());
    assert_eq!(plain, with_builtins);
}

#[test]
fn render_is_deterministic() {
    let content = "# h\n```\ncode\n```\n*i* and **b**\n> q\n---\n@replay x\n#tag y";
    assert_eq!(
        render(content, &ActionRegistry::empty()),
        render(content, &ActionRegistry::empty())
    );
}

#[test]
fn code_block_shields_content_from_other_rules() {
    let out = render(
        "```\n# heading\n- bullet\n@replay m\n---\n```",
        &ActionRegistry::empty(),
    );
    let lines: Vec<&str> = out.split('\n').collect();
    assert!(lines[1].contains("# heading"));
    assert!(lines[2].contains("- bullet"));
    assert!(lines[3].contains("@replay m"));
    assert!(lines[4].contains("---"));
    assert!(!lines[4].contains('─'));
}

#[test]
fn render_never_fails_on_arbitrary_input() {
    for content in [
        "",
        "\n\n\n",
        "``",
        "`unterminated",
        "*a**b*",
        "@macro \n@replay\n:macro x",
        "### \n## \n# ",
    ] {
        let out = render(content, &ActionRegistry::builtin());
        assert_eq!(out.split('\n').count(), content.split('\n').count());
    }
}

#[test]
fn unknown_replay_marker_still_renders_as_tag() {
    let out = render("@replay ghost", &ActionRegistry::empty());
    assert!(out.contains("[Edit Macro: ghost]"));
}
