//! Per-parameter regex constraints.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How a constraint pattern is applied to a segment value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The pattern must match the whole segment (`^(?:pattern)$`)
    #[default]
    Full,
    /// The pattern may match anywhere inside the segment
    Search,
}

impl MatchMode {
    /// Parse `full` / `search` (case-insensitive), defaulting to `Full`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "search" => MatchMode::Search,
            _ => MatchMode::Full,
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Full => write!(f, "full"),
            MatchMode::Search => write!(f, "search"),
        }
    }
}

#[allow(clippy::expect_used)]
static ANY: Lazy<Constraint> = Lazy::new(|| {
    let any =
        Constraint::compile("(?s:.*)", MatchMode::Full).expect("match-anything regex compiles");
    Constraint {
        source: Arc::from(".*"),
        ..any
    }
});

/// A compiled constraint. Cheap to clone; the regex is reference counted.
#[derive(Clone)]
pub struct Constraint {
    source: Arc<str>,
    regex: Regex,
}

impl Constraint {
    /// Compile `pattern` for the given mode.
    ///
    /// The pattern must be a valid regex on its own; `Full` anchors it only
    /// after that check.
    pub fn compile(pattern: &str, mode: MatchMode) -> Result<Self, regex::Error> {
        let unanchored = Regex::new(pattern)?;
        let regex = match mode {
            MatchMode::Full => anchor(pattern)?,
            MatchMode::Search => unanchored,
        };
        Ok(Self {
            source: Arc::from(pattern),
            regex,
        })
    }

    /// The constraint used for parameters that declare none.
    #[must_use]
    pub fn any() -> Self {
        ANY.clone()
    }

    #[inline]
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// The pattern as declared, before anchoring.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Wrap an already validated pattern in `^(?:...)$`.
fn anchor(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$")).or_else(|_| {
        // A trailing `(?x)` comment runs to end of line and swallows `)$`.
        Regex::new(&format!("^(?:{pattern}\n)$"))
    })
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Constraint").field(&self.source).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_mode_matches_whole_segment() {
        let c = Constraint::compile(r"\d+", MatchMode::Full).unwrap();
        assert!(c.is_match("123"));
        assert!(!c.is_match("12a"));
        assert!(!c.is_match("a12"));
    }

    #[test]
    fn test_full_mode_alternation_is_grouped() {
        let c = Constraint::compile("cat|dog", MatchMode::Full).unwrap();
        assert!(c.is_match("cat"));
        assert!(c.is_match("dog"));
        assert!(!c.is_match("catdog"));
    }

    #[test]
    fn test_full_mode_accepts_explicit_anchors() {
        let c = Constraint::compile("^[a-z]+$", MatchMode::Full).unwrap();
        assert!(c.is_match("names"));
        assert!(!c.is_match("NAMES"));
    }

    #[test]
    fn test_search_mode_matches_substring() {
        let c = Constraint::compile(".", MatchMode::Search).unwrap();
        assert!(c.is_match("id"));
        assert!(!c.is_match(""));
        let full = Constraint::compile(".", MatchMode::Full).unwrap();
        assert!(!full.is_match("id"));
        assert!(full.is_match("i"));
    }

    #[test]
    fn test_any_matches_everything() {
        let any = Constraint::any();
        assert!(any.is_match(""));
        assert!(any.is_match("anything at all"));
        assert!(any.is_match("line\nbreak"));
        assert_eq!(any.as_str(), ".*");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Constraint::compile("(", MatchMode::Full).is_err());
        assert!(Constraint::compile("(", MatchMode::Search).is_err());
    }

    #[test]
    fn test_pattern_must_be_valid_on_its_own() {
        assert!(Regex::new("a)|(b").is_err());
        assert!(Constraint::compile("a)|(b", MatchMode::Full).is_err());
        assert!(Constraint::compile("a)|(b", MatchMode::Search).is_err());
    }

    #[test]
    fn test_full_mode_verbose_trailing_comment() {
        let c = Constraint::compile("(?x) [0-9]+ # digits", MatchMode::Full).unwrap();
        assert!(c.is_match("42"));
        assert!(!c.is_match("42a"));
        assert!(!c.is_match("42\n"));
        assert_eq!(c.as_str(), "(?x) [0-9]+ # digits");
    }

    #[test]
    fn test_full_mode_verbose_without_comment() {
        let c = Constraint::compile("(?x) [a-z] +", MatchMode::Full).unwrap();
        assert!(c.is_match("abc"));
        assert!(!c.is_match("ab c"));
    }

    #[test]
    fn test_match_mode_parse() {
        assert_eq!(MatchMode::parse("full"), MatchMode::Full);
        assert_eq!(MatchMode::parse("SEARCH"), MatchMode::Search);
        assert_eq!(MatchMode::parse("bogus"), MatchMode::Full);
        assert_eq!(MatchMode::Search.to_string(), "search");
    }
}
