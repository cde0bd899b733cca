//! Conditional template rewriting
//!
//! Two passes run over a file's text, in order. The substitution pass
//! replaces `<tok> name <tok>` variable tokens with resolved values. The
//! block pass then walks the module toggles of the current level: an enabled
//! module keeps its block body (the two marker lines are dropped) and the
//! whole rewrite recurses into the block's nested toggles; a disabled module
//! has its block deleted outright, markers, body, nested markers and all.
//!
//! Anything the passes do not recognize is left alone, so running the
//! rewriter over a non-template file is harmless.

pub mod policy;

use crate::resolve::{ResolvedSet, ResolvedValue};
use regex::Regex;

/// Rewrite one file's text against one resolved tree level.
///
/// `delimiter` is the block-marker token the delimiter policy picked for this
/// file; it is kept through recursive descent into enabled blocks. Pure
/// function of its inputs.
pub fn rewrite(text: &str, values: &ResolvedSet, delimiter: &str) -> String {
    let substituted = substitute_variables(text, values);
    apply_modules(substituted, values, delimiter)
}

/// Variable-substitution pass.
///
/// Tokens built from any policy marker token are recognized, not just the
/// file's own block delimiter: template sources routinely embed data-style
/// variable tokens inside code-style conditional blocks.
fn substitute_variables(text: &str, values: &ResolvedSet) -> String {
    let mut out = text.to_string();
    for token in policy::MARKER_TOKENS {
        out = substitute_token(&out, values, token);
    }
    out
}

fn substitute_token(text: &str, values: &ResolvedSet, token: &str) -> String {
    let tok = regex::escape(token);
    // Identifier shape mirrors the variable-name validation rule
    let pattern = marker_regex(format!(r"{tok} ([A-Za-z][A-Za-z0-9-]+[A-Za-z0-9]) {tok}"));

    pattern
        .replace_all(text, |caps: &regex::Captures<'_>| {
            match values.get(&caps[1]).map(|entry| entry.value()) {
                Some(ResolvedValue::Text(value)) if !value.is_empty() => value.clone(),
                // Unknown names and module toggles stay visible in the text
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Conditional-block pass, one module at a time in declaration order. Each
/// replacement operates on the cumulative result of the previous ones.
fn apply_modules(text: String, values: &ResolvedSet, delimiter: &str) -> String {
    let mut out = text;

    for entry in values.iter() {
        let enabled = match entry.value() {
            ResolvedValue::Enabled(on) => *on,
            ResolvedValue::Text(_) => continue,
        };

        out = if enabled {
            let kept = strip_marker_lines(&out, entry.name(), delimiter);
            rewrite(&kept, entry.dependencies(), delimiter)
        } else {
            delete_blocks(&out, entry.name(), delimiter)
        };
    }

    out
}

/// Remove an enabled module's start/end marker lines, leaving the body
fn strip_marker_lines(text: &str, name: &str, delimiter: &str) -> String {
    let d = regex::escape(delimiter);
    let n = regex::escape(name);
    let markers = marker_regex(format!(
        r"(?m)^[ \t]*{d} {n}-(?:start|end) {d}[ \t]*(?:\r?\n|\z)"
    ));
    markers.replace_all(text, "").into_owned()
}

/// Remove a disabled module's blocks wholesale: marker lines and everything
/// between them, newline-inclusive, non-greedy up to the nearest matching
/// end marker
fn delete_blocks(text: &str, name: &str, delimiter: &str) -> String {
    let d = regex::escape(delimiter);
    let n = regex::escape(name);
    let block = marker_regex(format!(
        r"(?ms)^[ \t]*{d} {n}-start {d}[ \t]*\r?\n.*?^[ \t]*{d} {n}-end {d}[ \t]*(?:\r?\n|\z)"
    ));
    block.replace_all(text, "").into_owned()
}

// Marker patterns are assembled from escaped fragments, so compilation
// cannot fail on user input
fn marker_regex(pattern: String) -> Regex {
    Regex::new(&pattern).expect("marker pattern compiles")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ResolvedEntry;

    fn scenario_values(api: bool, use_domain: bool) -> ResolvedSet {
        let nested = if api {
            ResolvedSet::new(vec![ResolvedEntry::module(
                "use-domain",
                use_domain,
                ResolvedSet::default(),
            )])
        } else {
            ResolvedSet::default()
        };
        ResolvedSet::new(vec![
            ResolvedEntry::variable("ms-name", "orders"),
            ResolvedEntry::module("api", api, nested),
        ])
    }

    const SCENARIO_INPUT: &str = "/// api-start ///\nconsole.log('### ms-name ###');\n/// use-domain-start ///\nDOMAIN\n/// use-domain-end ///\n/// api-end ///";

    #[test]
    fn test_disabled_module_removes_whole_block() {
        let out = rewrite(SCENARIO_INPUT, &scenario_values(false, false), "///");
        assert_eq!(out, "");
    }

    #[test]
    fn test_enabled_module_keeps_body_and_resolves_nested_block() {
        let out = rewrite(SCENARIO_INPUT, &scenario_values(true, false), "///");
        assert_eq!(out, "console.log('orders');\n");
    }

    #[test]
    fn test_nested_enabled_block_is_unwrapped() {
        let out = rewrite(SCENARIO_INPUT, &scenario_values(true, true), "///");
        assert_eq!(out, "console.log('orders');\nDOMAIN\n");
    }

    #[test]
    fn test_unresolved_variable_token_passes_through() {
        let values = scenario_values(false, false);
        let out = rewrite("value: ### unknown-var ###\n", &values, "###");
        assert_eq!(out, "value: ### unknown-var ###\n");
    }

    #[test]
    fn test_module_toggle_is_not_substituted_as_variable() {
        // `api` resolves to a boolean; a variable-shaped token naming it
        // must stay untouched
        let values = scenario_values(true, false);
        let out = rewrite("flag: ### api ###\n", &values, "###");
        assert_eq!(out, "flag: ### api ###\n");
    }

    #[test]
    fn test_substitution_is_idempotent() {
        let values = scenario_values(false, false);
        let once = rewrite("name: ### ms-name ###\n", &values, "###");
        let twice = rewrite(&once, &values, "###");
        assert_eq!(once, "name: orders\n");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_marker_free_text_is_untouched() {
        let values = scenario_values(true, true);
        let text = "plain text\nwith several lines\n\nand a blank one\n";
        assert_eq!(rewrite(text, &values, "///"), text);
    }

    #[test]
    fn test_block_preservation_keeps_all_other_bytes() {
        let values = ResolvedSet::new(vec![ResolvedEntry::module(
            "events",
            true,
            ResolvedSet::default(),
        )]);
        let text = "before\n### events-start ###\n  body line\n\n### events-end ###\nafter\n";
        assert_eq!(rewrite(text, &values, "###"), "before\n  body line\n\nafter\n");
    }

    #[test]
    fn test_disabled_block_spanning_many_lines_is_deleted() {
        let values = ResolvedSet::new(vec![ResolvedEntry::module(
            "s3",
            false,
            ResolvedSet::default(),
        )]);
        let text = "keep\n/// s3-start ///\nline 1\nline 2\nline 3\n/// s3-end ///\nkeep too\n";
        assert_eq!(rewrite(text, &values, "///"), "keep\nkeep too\n");
    }

    #[test]
    fn test_two_disabled_blocks_for_the_same_module() {
        let values = ResolvedSet::new(vec![ResolvedEntry::module(
            "ddb",
            false,
            ResolvedSet::default(),
        )]);
        let text = "### ddb-start ###\na\n### ddb-end ###\nmiddle\n### ddb-start ###\nb\n### ddb-end ###\n";
        // Non-greedy matching stops each deletion at the nearest end marker
        assert_eq!(rewrite(text, &values, "###"), "middle\n");
    }

    #[test]
    fn test_indented_marker_lines_are_recognized() {
        let values = ResolvedSet::new(vec![ResolvedEntry::module(
            "s3",
            false,
            ResolvedSet::default(),
        )]);
        let text = "start:\n    /// s3-start ///\n    checkBucket();\n    /// s3-end ///\ndone\n";
        assert_eq!(rewrite(text, &values, "///"), "start:\ndone\n");
    }

    #[test]
    fn test_start_without_end_is_left_alone() {
        let values = ResolvedSet::new(vec![ResolvedEntry::module(
            "s3",
            false,
            ResolvedSet::default(),
        )]);
        let text = "/// s3-start ///\ndangling\n";
        assert_eq!(rewrite(text, &values, "///"), text);
    }

    #[test]
    fn test_markers_for_other_delimiter_are_ignored_by_block_pass() {
        let values = ResolvedSet::new(vec![ResolvedEntry::module(
            "s3",
            false,
            ResolvedSet::default(),
        )]);
        let text = "### s3-start ###\nkept, wrong token for this file\n### s3-end ###\n";
        assert_eq!(rewrite(text, &values, "///"), text);
    }

    #[test]
    fn test_variable_tokens_of_both_styles_substitute() {
        let values = ResolvedSet::new(vec![ResolvedEntry::variable("ms-name", "orders")]);
        let text = "a: ### ms-name ###\nb: /// ms-name ///\n";
        assert_eq!(rewrite(text, &values, "###"), "a: orders\nb: orders\n");
    }

    #[test]
    fn test_nested_variable_resolves_at_its_own_level() {
        // domain-name lives two levels down: api > use-domain > domain-name
        let inner = ResolvedSet::new(vec![ResolvedEntry::variable("domain-name", "api.example.com")]);
        let mid = ResolvedSet::new(vec![ResolvedEntry::module("use-domain", true, inner)]);
        let values = ResolvedSet::new(vec![ResolvedEntry::module("api", true, mid)]);

        let text = "### api-start ###\n### use-domain-start ###\ndomain: ### domain-name ###\n### use-domain-end ###\n### api-end ###\n";
        assert_eq!(rewrite(text, &values, "###"), "domain: api.example.com\n");
    }

    #[test]
    fn test_empty_variable_value_leaves_token_in_place() {
        let values = ResolvedSet::new(vec![ResolvedEntry::variable("ms-name", "")]);
        let text = "name: ### ms-name ###\n";
        assert_eq!(rewrite(text, &values, "###"), text);
    }

    #[test]
    fn test_crlf_marker_lines() {
        let values = ResolvedSet::new(vec![ResolvedEntry::module(
            "api",
            false,
            ResolvedSet::default(),
        )]);
        let text = "keep\r\n### api-start ###\r\ngone\r\n### api-end ###\r\nkeep\r\n";
        assert_eq!(rewrite(text, &values, "###"), "keep\r\nkeep\r\n");
    }
}
