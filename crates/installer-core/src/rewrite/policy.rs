//! File-type marker policy
//!
//! Template syntax is bracketed by a short marker token chosen per file type:
//! source files use a comment-friendly token, every other processable file
//! uses a hash-based one. Files whose extension is not on the allow-list are
//! copied verbatim and never reach the rewriter.

use std::path::Path;

/// Marker token for source-code files
pub const CODE_TOKEN: &str = "///";

/// Marker token for all other processable files
pub const DATA_TOKEN: &str = "###";

/// Every token the variable-substitution pass recognizes
pub const MARKER_TOKENS: &[&str] = &[CODE_TOKEN, DATA_TOKEN];

/// Extensions eligible for rewriting
pub const PROCESSABLE_EXTENSIONS: &[&str] = &["js", "ts", "yml", "yaml"];

const CODE_EXTENSIONS: &[&str] = &["js", "ts"];

/// The block-marker token for a file extension (without the leading dot).
/// Anything not recognizably source code gets the data token.
pub fn delimiter_for(extension: &str) -> &'static str {
    if CODE_EXTENSIONS
        .iter()
        .any(|code| extension.eq_ignore_ascii_case(code))
    {
        CODE_TOKEN
    } else {
        DATA_TOKEN
    }
}

/// Whether a file may be passed through the rewriter at all
pub fn is_processable(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            PROCESSABLE_EXTENSIONS
                .iter()
                .any(|allowed| extension.eq_ignore_ascii_case(allowed))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_extensions_use_the_code_token() {
        assert_eq!(delimiter_for("ts"), CODE_TOKEN);
        assert_eq!(delimiter_for("js"), CODE_TOKEN);
        assert_eq!(delimiter_for("TS"), CODE_TOKEN);
    }

    #[test]
    fn test_everything_else_uses_the_data_token() {
        assert_eq!(delimiter_for("yml"), DATA_TOKEN);
        assert_eq!(delimiter_for("yaml"), DATA_TOKEN);
        assert_eq!(delimiter_for("json"), DATA_TOKEN);
        assert_eq!(delimiter_for(""), DATA_TOKEN);
    }

    #[test]
    fn test_processable_allow_list() {
        assert!(is_processable(Path::new("serverless.yml")));
        assert!(is_processable(Path::new("src/index.ts")));
        assert!(is_processable(Path::new("src/INDEX.TS")));
        assert!(!is_processable(Path::new("package.json")));
        assert!(!is_processable(Path::new("README.md")));
        assert!(!is_processable(Path::new("Makefile")));
    }
}
