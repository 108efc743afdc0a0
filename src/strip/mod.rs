//! Comment removal engines.
//!
//! Python gets a syntax-aware pass that protects docstrings; every other
//! recognized language gets ordered regex substitution over the whole file.
//! The regex rules are textual and make no attempt to understand string
//! literals: a `//` inside a string is stripped like any other marker.

mod python;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

use crate::domain::StripMode;

const LINE_SLASH: &str = r"//.*";
const BLOCK_SLASH: &str = r"/\*[\s\S]*?\*/";
const LINE_HASH: &str = r"#.*";
const BLOCK_HTML: &str = r"<!--[\s\S]*?-->";

/// Ordered removal rules per extension; built once at startup, never mutated.
static COMMENT_PATTERNS: Lazy<HashMap<&'static str, Vec<Regex>>> = Lazy::new(|| {
    [
        (".c", vec![LINE_SLASH, BLOCK_SLASH]),
        (".cpp", vec![LINE_SLASH, BLOCK_SLASH]),
        (".java", vec![LINE_SLASH, BLOCK_SLASH]),
        (".js", vec![LINE_SLASH, BLOCK_SLASH]),
        (".ts", vec![LINE_SLASH, BLOCK_SLASH]),
        (".sh", vec![LINE_HASH]),
        (".rb", vec![LINE_HASH]),
        (".go", vec![LINE_SLASH, BLOCK_SLASH]),
        (".php", vec![LINE_SLASH, BLOCK_SLASH, LINE_HASH]),
        (".html", vec![BLOCK_HTML]),
        (".css", vec![BLOCK_SLASH]),
    ]
    .into_iter()
    .map(|(ext, patterns)| (ext, patterns.into_iter().map(compile).collect()))
    .collect()
});

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .expect("comment pattern compiles")
}

/// The engine responsible for `extension` (lowercased, dot-prefixed), or
/// `None` when the extension is unrecognized and the file passes through
/// untouched.
pub fn mode_for(extension: &str) -> Option<StripMode> {
    let ext = extension.to_ascii_lowercase();
    if ext == ".py" {
        Some(StripMode::Syntax)
    } else if COMMENT_PATTERNS.contains_key(ext.as_str()) {
        Some(StripMode::Pattern)
    } else {
        None
    }
}

/// Remove comments from `source` with the given engine. Only the syntax
/// engine can fail (on a Python parse error).
pub fn strip(mode: StripMode, source: &str, extension: &str) -> Result<String> {
    match mode {
        StripMode::Syntax => python::strip_python(source),
        StripMode::Pattern => Ok(strip_with_patterns(source, extension)),
    }
}

fn strip_with_patterns(source: &str, extension: &str) -> String {
    let ext = extension.to_ascii_lowercase();
    let Some(rules) = COMMENT_PATTERNS.get(ext.as_str()) else {
        return source.to_string();
    };
    let mut content = source.to_string();
    for rule in rules {
        content = rule.replace_all(&content, "").into_owned();
    }
    content
}

#[cfg(test)]
mod tests {
    use super::{mode_for, strip, strip_with_patterns};
    use crate::domain::StripMode;

    #[test]
    fn mode_selection_by_extension() {
        assert_eq!(mode_for(".py"), Some(StripMode::Syntax));
        assert_eq!(mode_for(".PY"), Some(StripMode::Syntax));
        assert_eq!(mode_for(".js"), Some(StripMode::Pattern));
        assert_eq!(mode_for(".Rb"), Some(StripMode::Pattern));
        assert_eq!(mode_for(".xyz"), None);
        assert_eq!(mode_for(""), None);
    }

    #[test]
    fn c_line_and_block_comments_removed() {
        let source = "int x = 1; // count\n/* block\n   spans lines */\nint y = 2;\n";
        let stripped = strip_with_patterns(source, ".c");
        assert_eq!(stripped, "int x = 1; \n\nint y = 2;\n");
    }

    #[test]
    fn block_pattern_is_non_greedy() {
        let source = "/* a */ keep /* b */\n";
        assert_eq!(strip_with_patterns(source, ".js"), " keep \n");
    }

    #[test]
    fn block_comment_swallows_embedded_line_marker() {
        // The line pattern runs first and eats from `//` to end of line,
        // including the block terminator on that line.
        let source = "/* start // inner\nend */\ncode();\n";
        let stripped = strip_with_patterns(source, ".js");
        assert!(stripped.contains("code();"));
        assert!(!stripped.contains("inner"));
    }

    #[test]
    fn shell_hash_comments_removed() {
        let source = "#!/bin/sh\necho hi # greet\n# whole line\n";
        assert_eq!(strip_with_patterns(source, ".sh"), "\necho hi \n\n");
    }

    #[test]
    fn php_applies_all_three_rules() {
        let source = "<?php\n// slash\n# hash\n/* block */\n$x = 1;\n";
        let stripped = strip_with_patterns(source, ".php");
        assert_eq!(stripped, "<?php\n\n\n\n$x = 1;\n");
    }

    #[test]
    fn html_comments_removed_across_lines() {
        let source = "<p>hi</p>\n<!-- note\n     spans -->\n<p>bye</p>\n";
        assert_eq!(strip_with_patterns(source, ".html"), "<p>hi</p>\n\n<p>bye</p>\n");
    }

    #[test]
    fn css_block_comments_removed() {
        let source = "/* header */\nbody { color: red; }\n";
        assert_eq!(strip_with_patterns(source, ".css"), "\nbody { color: red; }\n");
    }

    #[test]
    fn unknown_extension_passes_through() {
        let source = "// untouched\n";
        assert_eq!(strip_with_patterns(source, ".xyz"), source);
    }

    #[test]
    fn pattern_strip_is_idempotent() {
        let source = "let a = 1; // one\n/* two */\nlet b = 2;\n";
        let once = strip_with_patterns(source, ".js");
        let twice = strip_with_patterns(&once, ".js");
        assert_eq!(once, twice);
    }

    #[test]
    fn string_literals_are_not_protected() {
        // Accepted imprecision of textual removal: a URL inside a string
        // loses everything from `//` to end of line.
        let source = "const u = \"https://example.com\";\n";
        assert_eq!(strip_with_patterns(source, ".js"), "const u = \"https:\n");
    }

    #[test]
    fn strip_dispatches_to_pattern_engine() {
        let out = strip(StripMode::Pattern, "x(); // call\n", ".js").expect("pattern strip");
        assert_eq!(out, "x(); \n");
    }
}
