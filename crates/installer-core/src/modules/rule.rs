//! Validation rules for prompt answers

use regex::Regex;

/// Validation predicate applied to a free-text answer before it is accepted.
///
/// A rule combines optional length bounds with an optional pattern match and
/// carries the rejection message shown when the answer fails.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Option<Regex>,
    min_len: usize,
    max_len: usize,
    message: String,
}

impl Rule {
    /// Create a rule that accepts any non-empty answer
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            pattern: None,
            min_len: 1,
            max_len: usize::MAX,
            message: message.into(),
        }
    }

    /// Restrict the answer length (in characters, inclusive bounds)
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_len = min;
        self.max_len = max;
        self
    }

    /// Require the answer to match a pattern.
    ///
    /// Panics if the pattern does not compile; rules are authored in code, so
    /// a bad pattern is a programmer error caught by the test suite.
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(Regex::new(pattern).expect("validation pattern compiles"));
        self
    }

    /// The rejection message shown when `check` fails
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Run the rule against a raw answer
    pub fn check(&self, answer: &str) -> bool {
        let len = answer.chars().count();
        if len < self.min_len || len > self.max_len {
            return false;
        }
        match &self.pattern {
            Some(pattern) => pattern.is_match(answer),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        let rule = Rule::new("too short or too long").length(3, 5);
        assert!(!rule.check("ab"));
        assert!(rule.check("abc"));
        assert!(rule.check("abcde"));
        assert!(!rule.check("abcdef"));
    }

    #[test]
    fn test_empty_rejected_by_default() {
        let rule = Rule::new("required");
        assert!(!rule.check(""));
        assert!(rule.check("x"));
    }

    #[test]
    fn test_anchored_pattern() {
        let rule = Rule::new("bad name").pattern(r"^[a-zA-Z][a-zA-Z0-9-]+[a-zA-Z0-9]$");
        assert!(rule.check("orders-service"));
        assert!(!rule.check("-orders"));
        assert!(!rule.check("orders-"));
        assert!(!rule.check("orders service"));
    }

    #[test]
    fn test_unanchored_pattern_matches_anywhere() {
        // Mirrors the domain rule, which only requires a hostname somewhere
        // in the answer
        let rule = Rule::new("bad domain")
            .pattern(r"(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9][a-z0-9-]{0,61}[a-z0-9]");
        assert!(rule.check("api.example.com"));
        assert!(!rule.check("localhost"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let rule = Rule::new("len").length(1, 3);
        assert!(rule.check("äöü"));
    }
}
