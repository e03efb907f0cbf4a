//! Parsing for the `requirecss` attribute (on a template file or a
//! single template).
//!
//! The attribute value is a comma-separated list of CSS namespaces,
//! each a dotted identifier. Validation fails closed: any malformed
//! token aborts the parse with the offending token preserved verbatim,
//! and the error is expected to surface as a hard compile error for the
//! containing file.

use std::fmt;

/// Error for a malformed `requirecss` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRequireCss {
    token: String,
}

impl InvalidRequireCss {
    /// The offending token, exactly as it appeared in the attribute.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for InvalidRequireCss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid required CSS namespace name \"{}\"", self.token)
    }
}

impl std::error::Error for InvalidRequireCss {}

/// Parse a `requirecss` attribute value.
///
/// An absent attribute yields an empty list. Otherwise the value is
/// split on commas (arbitrary whitespace around each comma is ignored)
/// and every token must be a dotted identifier. Tokens are returned in
/// source order with duplicates preserved.
pub fn parse_requirecss_attr(attr: Option<&str>) -> Result<Vec<String>, InvalidRequireCss> {
    let Some(attr) = attr else {
        return Ok(Vec::new());
    };
    let mut namespaces = Vec::new();
    for token in attr.trim().split(',') {
        let token = token.trim();
        if !is_dotted_identifier(token) {
            return Err(InvalidRequireCss {
                token: token.to_owned(),
            });
        }
        namespaces.push(token.to_owned());
    }
    Ok(namespaces)
}

/// Whether `s` is a dotted identifier: one or more identifier segments
/// separated by single dots.
pub fn is_dotted_identifier(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_identifier)
}

/// Whether `s` is a plain identifier: letters, digits, and underscores,
/// not starting with a digit.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_attr_is_empty() {
        assert_eq!(parse_requirecss_attr(None), Ok(vec![]));
    }

    #[test]
    fn empty_attr_is_invalid() {
        let err = parse_requirecss_attr(Some("")).unwrap_err();
        assert_eq!(err.token(), "");
    }

    #[test]
    fn single_namespace() {
        assert_eq!(
            parse_requirecss_attr(Some("foo.bar")),
            Ok(vec!["foo.bar".to_owned()])
        );
    }

    #[test]
    fn whitespace_around_commas_is_trimmed() {
        assert_eq!(
            parse_requirecss_attr(Some("a.b, c.d ,e")),
            Ok(vec!["a.b".to_owned(), "c.d".to_owned(), "e".to_owned()])
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            parse_requirecss_attr(Some("  ns.one , ns.two  ")),
            Ok(vec!["ns.one".to_owned(), "ns.two".to_owned()])
        );
    }

    #[test]
    fn double_dot_is_invalid_and_cites_token() {
        let err = parse_requirecss_attr(Some("a..b")).unwrap_err();
        assert_eq!(err.token(), "a..b");
        assert_eq!(
            err.to_string(),
            "invalid required CSS namespace name \"a..b\""
        );
    }

    #[test]
    fn one_bad_token_fails_the_whole_attr() {
        let err = parse_requirecss_attr(Some("good.ns, 9bad")).unwrap_err();
        assert_eq!(err.token(), "9bad");
    }

    #[test]
    fn duplicates_are_preserved() {
        assert_eq!(
            parse_requirecss_attr(Some("a.b,a.b")),
            Ok(vec!["a.b".to_owned(), "a.b".to_owned()])
        );
    }

    #[test]
    fn trailing_comma_is_invalid() {
        let err = parse_requirecss_attr(Some("a.b,")).unwrap_err();
        assert_eq!(err.token(), "");
    }

    #[test]
    fn dotted_identifier_rules() {
        assert!(is_dotted_identifier("a"));
        assert!(is_dotted_identifier("a.b.c"));
        assert!(is_dotted_identifier("_x.y9"));
        assert!(!is_dotted_identifier(""));
        assert!(!is_dotted_identifier("a."));
        assert!(!is_dotted_identifier(".a"));
        assert!(!is_dotted_identifier("a..b"));
        assert!(!is_dotted_identifier("9a"));
        assert!(!is_dotted_identifier("a-b"));
        assert!(!is_dotted_identifier("a b"));
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("_"));
        assert!(is_identifier("x0"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("0x"));
    }
}
