//! Declaration patterns: how a symbol declaration looks in one side's syntax.
//!
//! The extractor only talks to [`SymbolMatcher`], so a new binding convention
//! is a new matcher (or a new regex), never a change to extraction or
//! reconciliation.

use std::fmt;

use regex::Regex;

use crate::error::CheckError;

/// Given a single source line, optionally produce the declared symbol name.
pub trait SymbolMatcher: Send + Sync {
    fn match_line<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// Human-readable form for listings and logs.
    fn describe(&self) -> &str {
        "<custom matcher>"
    }
}

/// Regex with exactly one capture group yielding the symbol name.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compile `expr`. `label` is only used in the error message.
    pub fn new(label: &str, expr: &str) -> Result<Self, CheckError> {
        let regex = Regex::new(expr).map_err(|e| CheckError::InvalidPattern {
            label: label.into(),
            message: e.to_string(),
        })?;
        // captures_len counts the implicit whole-match group
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(CheckError::InvalidPattern {
                label: label.into(),
                message: format!("expected exactly one capture group, found {groups}"),
            });
        }
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl SymbolMatcher for RegexMatcher {
    fn match_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|name| !name.is_empty())
    }

    fn describe(&self) -> &str {
        self.regex.as_str()
    }
}

/// Immutable descriptor of one side's declaration syntax plus its label.
pub struct DeclarationPattern {
    label: String,
    matcher: Box<dyn SymbolMatcher>,
}

impl DeclarationPattern {
    pub fn new(label: impl Into<String>, matcher: impl SymbolMatcher + 'static) -> Self {
        Self {
            label: label.into(),
            matcher: Box::new(matcher),
        }
    }

    pub fn from_regex(label: impl Into<String>, expr: &str) -> Result<Self, CheckError> {
        let label = label.into();
        let matcher = RegexMatcher::new(&label, expr)?;
        Ok(Self::new(label, matcher))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn describe(&self) -> &str {
        self.matcher.describe()
    }

    pub fn match_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.matcher.match_line(line)
    }
}

impl fmt::Debug for DeclarationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclarationPattern")
            .field("label", &self.label)
            .field("matcher", &self.matcher.describe())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regex_captures_symbol() {
        let p = DeclarationPattern::from_regex("native", r"^export fn (\w+)\(").unwrap();
        assert_eq!(p.match_line("export fn string_free(s)"), Some("string_free"));
        assert_eq!(p.match_line("fn string_free(s)"), None);
        assert_eq!(p.label(), "native");
    }

    #[test]
    fn reject_zero_capture_groups() {
        let err = DeclarationPattern::from_regex("native", r"extern fn \w+").unwrap_err();
        assert!(err.to_string().contains("found 0"));
    }

    #[test]
    fn reject_two_capture_groups() {
        let err = DeclarationPattern::from_regex("native", r"(pub )?fn (\w+)").unwrap_err();
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn non_capturing_groups_are_allowed() {
        let p = DeclarationPattern::from_regex("native", r"pub (?:unsafe )?fn (\w+)").unwrap();
        assert_eq!(p.match_line("pub unsafe fn f(x)"), Some("f"));
    }

    #[test]
    fn reject_bad_regex() {
        let err = DeclarationPattern::from_regex("consumer", r"fn ((\w+)").unwrap_err();
        assert!(err.to_string().contains("'consumer'"));
    }

    #[test]
    fn empty_capture_is_no_match() {
        let p = DeclarationPattern::from_regex("native", r"fn (\w*)\(").unwrap();
        assert_eq!(p.match_line("fn ()"), None);
    }

    struct Prefix;

    impl SymbolMatcher for Prefix {
        fn match_line<'a>(&self, line: &'a str) -> Option<&'a str> {
            line.strip_prefix("sym:").map(str::trim)
        }
    }

    #[test]
    fn custom_matcher() {
        let p = DeclarationPattern::new("native", Prefix);
        assert_eq!(p.match_line("sym: foo"), Some("foo"));
        assert_eq!(p.match_line("foo"), None);
        assert_eq!(p.describe(), "<custom matcher>");
    }
}
