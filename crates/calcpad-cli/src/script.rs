//! Key scripts
//!
//! A script is text split into browser key names. The named keys (`Enter`,
//! `Escape`, `Backspace`) are matched whole; every other non-space character
//! is one key. Lines starting with `#` are comments.

use regex::Regex;

use crate::error::{CliError, CliResult};

/// Splits script text into key names
#[derive(Debug, Clone)]
pub struct KeyScriptParser {
    token: Regex,
}

impl KeyScriptParser {
    /// Token pattern: a named key, or any single non-space character
    pub const PATTERN: &'static str = r"Enter|Escape|Backspace|\S";

    /// Compiles the tokenizer
    pub fn new() -> CliResult<Self> {
        let token = Regex::new(Self::PATTERN)
            .map_err(|e| CliError::invalid_argument(format!("key script pattern: {e}")))?;
        Ok(Self { token })
    }

    /// Key names of `text`, in order
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<String> {
        text.lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(|line| self.token.find_iter(line))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Key names of several script fragments, concatenated
    #[must_use]
    pub fn parse_all<S: AsRef<str>>(&self, fragments: &[S]) -> Vec<String> {
        fragments
            .iter()
            .flat_map(|fragment| self.parse(fragment.as_ref()))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn parser() -> KeyScriptParser {
        KeyScriptParser::new().unwrap()
    }

    #[test]
    fn test_parse_compact() {
        assert_eq!(parser().parse("6+3="), vec!["6", "+", "3", "="]);
    }

    #[test]
    fn test_parse_spaced_with_named_keys() {
        assert_eq!(parser().parse("6 + 3 Enter"), vec!["6", "+", "3", "Enter"]);
    }

    #[test]
    fn test_parse_named_keys_adjacent() {
        assert_eq!(
            parser().parse("12BackspaceEscape7"),
            vec!["1", "2", "Backspace", "Escape", "7"]
        );
    }

    #[test]
    fn test_parse_unknown_letters_kept() {
        // mapping decides what is ignored, not the tokenizer
        assert_eq!(parser().parse("Tab"), vec!["T", "a", "b"]);
    }

    #[test]
    fn test_parse_comments_and_lines() {
        let script = "# add two numbers\n1 +\n  # still a comment\n2\nEnter\n";
        assert_eq!(parser().parse(script), vec!["1", "+", "2", "Enter"]);
    }

    #[test]
    fn test_parse_unicode() {
        assert_eq!(parser().parse("4×2"), vec!["4", "×", "2"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parser().parse("").is_empty());
        assert!(parser().parse("   \n\t").is_empty());
    }

    #[test]
    fn test_parse_all() {
        let keys = parser().parse_all(&["6+", "3", "Enter"]);
        assert_eq!(keys, vec!["6", "+", "3", "Enter"]);
    }
}
