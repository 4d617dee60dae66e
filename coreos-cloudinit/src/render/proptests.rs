//! Property-based tests for the assembled document.

use super::format::reindent;
use super::render;
use crate::value::{Block, ConfigTree};
use proptest::prelude::*;

fn unit_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,12}\\.(service|mount|timer)"
}

fn content_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[A-Za-z][A-Za-z0-9=/ .-]{0,30}",
    ]
}

fn content_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(content_line_strategy(), 1..8).prop_map(|lines| lines.join("\n"))
}

/// Printable ASCII plus newline and tab, so YAML indicators, `: `, ` #`
/// and line breaks all show up.
fn free_text_strategy() -> impl Strategy<Value = String> {
    "[ -~\n\t]{1,24}"
}

/// File bodies whose lines may start with spaces or tabs, including the
/// first one.
fn indented_content_strategy() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        Just(String::new()),
        "[ \t]{0,6}[!-~][ -~]{0,30}",
    ];
    prop::collection::vec(line, 1..8)
        .prop_map(|lines| lines.join("\n"))
        .prop_filter("needs a non-blank line", |c| !c.trim().is_empty())
}

/// What a literal block scalar reads back as: blank lines emptied, trailing
/// blank lines dropped, one final newline.
fn block_scalar_value(content: &str) -> String {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| if line.trim().is_empty() { "" } else { line })
        .collect();
    let mut value = lines.join("\n").trim_end_matches('\n').to_string();
    value.push('\n');
    value
}

fn units_strategy() -> impl Strategy<Value = Vec<(String, bool, bool)>> {
    prop::collection::vec((unit_name_strategy(), any::<bool>(), any::<bool>()), 0..6)
}

fn units_tree(units: &[(String, bool, bool)]) -> ConfigTree {
    let blocks: Vec<Block> = units
        .iter()
        .map(|(name, enable, runtime)| {
            Block::new()
                .with("name", name.as_str())
                .with("content", "[Unit]\nDescription=generated")
                .with("enable", *enable)
                .with("runtime", *runtime)
        })
        .collect();
    ConfigTree::new(Block::new().with("systemd_unit", blocks))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        .. ProptestConfig::default()
    })]

    // Units appear in the order they were supplied
    #[test]
    fn units_keep_input_order(units in units_strategy()) {
        let text = render(&units_tree(&units)).unwrap().text;
        let mut cursor = 0;
        for (name, _, _) in &units {
            let needle = format!("- name: {name}\n");
            let found = text[cursor..].find(&needle);
            prop_assert!(found.is_some(), "{} missing after byte {}", name, cursor);
            cursor += found.unwrap_or(0) + needle.len();
        }
    }

    // Rendering is deterministic
    #[test]
    fn render_is_idempotent(units in units_strategy(), hostname in "[a-z]{1,10}") {
        let mut tree = units_tree(&units);
        let root = tree.root().clone().with("hostname", hostname.as_str());
        tree = ConfigTree::new(root);
        let first = render(&tree).unwrap();
        let second = render(&tree).unwrap();
        prop_assert_eq!(first.content_id(), second.content_id());
        prop_assert_eq!(first.text, second.text);
    }

    // True flags appear once per unit; false flags never appear
    #[test]
    fn unit_flags_only_when_true(units in units_strategy()) {
        let text = render(&units_tree(&units)).unwrap().text;
        let enabled = units.iter().filter(|(_, e, _)| *e).count();
        let runtime = units.iter().filter(|(_, _, r)| *r).count();
        prop_assert_eq!(text.matches("enable: true\n").count(), enabled);
        prop_assert_eq!(text.matches("runtime: true\n").count(), runtime);
        prop_assert!(!text.contains(": false"));
    }

    // The shebang flag only changes the header
    #[test]
    fn shebang_only_changes_header(units in units_strategy()) {
        let plain = render(&units_tree(&units)).unwrap().text;
        let root = units_tree(&units).root().clone().with("use_shebang", true);
        let shebang = render(&ConfigTree::new(root)).unwrap().text;
        prop_assert_eq!(&shebang[2..], &plain[1..]);
    }

    // Reindented content never gains trailing whitespace and keeps every line
    #[test]
    fn reindent_preserves_lines(content in content_strategy(), depth in 0..6usize) {
        let out = reindent(&content, depth);
        prop_assert_eq!(out.lines().count(), content.lines().count());
        for (line, original) in out.lines().zip(content.lines()) {
            if original.trim().is_empty() {
                prop_assert!(line.is_empty());
            } else {
                prop_assert_eq!(line.len(), original.len() + depth * 2);
                prop_assert!(line.ends_with(original));
            }
        }
    }

    // Output never contains tabs
    #[test]
    fn no_tabs_in_output(units in units_strategy()) {
        let text = render(&units_tree(&units)).unwrap().text;
        prop_assert!(!text.contains('\t'));
    }

    // The document parses as YAML and free-form values read back unchanged
    #[test]
    fn output_parses_back_to_inputs(
        hostname in free_text_strategy(),
        user_name in free_text_strategy(),
        gecos in free_text_strategy(),
        path in "/[ -~]{0,20}",
        owner in free_text_strategy(),
        content in indented_content_strategy(),
        unit_name in free_text_strategy(),
    ) {
        prop_assume!(!unit_name.trim().is_empty());
        let root = Block::new()
            .with("hostname", hostname.as_str())
            .with(
                "systemd_unit",
                Block::new()
                    .with("name", unit_name.as_str())
                    .with("content", content.as_str()),
            )
            .with(
                "write_file",
                Block::new()
                    .with("path", path.as_str())
                    .with("owner", owner.as_str())
                    .with("content", content.as_str()),
            )
            .with(
                "user",
                Block::new()
                    .with("name", user_name.as_str())
                    .with("gecos", gecos.as_str()),
            );
        let text = render(&ConfigTree::new(root)).unwrap().text;

        let parsed: serde_yaml::Value = serde_yaml::from_str(&text)
            .map_err(|e| TestCaseError::fail(format!("{e}\n{text}")))?;
        let expected_content = block_scalar_value(&content);

        prop_assert_eq!(parsed["hostname"].as_str(), Some(hostname.as_str()));

        let unit = &parsed["coreos"]["units"][0];
        prop_assert_eq!(unit["name"].as_str(), Some(unit_name.as_str()));
        prop_assert_eq!(unit["content"].as_str(), Some(expected_content.as_str()));

        let file = &parsed["write_files"][0];
        prop_assert_eq!(file["path"].as_str(), Some(path.as_str()));
        prop_assert_eq!(file["owner"].as_str(), Some(owner.as_str()));
        prop_assert_eq!(file["content"].as_str(), Some(expected_content.as_str()));

        let user = &parsed["users"][0];
        prop_assert_eq!(user["name"].as_str(), Some(user_name.as_str()));
        prop_assert_eq!(user["gecos"].as_str(), Some(gecos.as_str()));
    }
}
