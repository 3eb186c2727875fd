//! URN identity parsing.
//!
//! Remote contacts carry URNs as `scheme:path` strings, optionally with a
//! `#display` fragment (e.g. `tel:+15551234567` or
//! `twitter:85114#billy_bob`). Local URN rows store the three parts
//! separately alongside the full identity.

/// A URN split into its component parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrnParts {
    /// The scheme, e.g. `tel`, `twitter`, `telegram`.
    pub scheme: String,
    /// The address within the scheme, e.g. `+15551234567`.
    pub path: String,
    /// Optional human-readable display fragment.
    pub display: Option<String>,
}

/// Parse a URN identity string into scheme, path, and display parts.
pub fn parse_urn(identity: &str) -> Result<UrnParts, String> {
    let (scheme, rest) = identity
        .split_once(':')
        .ok_or_else(|| format!("URN has no scheme separator: {identity}"))?;

    if scheme.is_empty() {
        return Err(format!("URN has an empty scheme: {identity}"));
    }

    let (path, display) = match rest.split_once('#') {
        Some((path, display)) if !display.is_empty() => (path, Some(display.to_string())),
        Some((path, _)) => (path, None),
        None => (rest, None),
    };

    if path.is_empty() {
        return Err(format!("URN has an empty path: {identity}"));
    }

    Ok(UrnParts {
        scheme: scheme.to_string(),
        path: path.to_string(),
        display,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tel_urn_parses() {
        let parts = parse_urn("tel:+1555").unwrap();
        assert_eq!(parts.scheme, "tel");
        assert_eq!(parts.path, "+1555");
        assert!(parts.display.is_none());
    }

    #[test]
    fn urn_with_display_fragment() {
        let parts = parse_urn("twitter:85114#billy_bob").unwrap();
        assert_eq!(parts.scheme, "twitter");
        assert_eq!(parts.path, "85114");
        assert_eq!(parts.display.as_deref(), Some("billy_bob"));
    }

    #[test]
    fn empty_display_fragment_is_none() {
        let parts = parse_urn("twitter:85114#").unwrap();
        assert!(parts.display.is_none());
    }

    #[test]
    fn path_may_contain_colons() {
        // Only the first colon separates the scheme.
        let parts = parse_urn("mailto:a:b@example.com").unwrap();
        assert_eq!(parts.scheme, "mailto");
        assert_eq!(parts.path, "a:b@example.com");
    }

    #[test]
    fn missing_scheme_rejected() {
        assert!(parse_urn("+1555").is_err());
        assert!(parse_urn(":path").is_err());
    }

    #[test]
    fn empty_path_rejected() {
        assert!(parse_urn("tel:").is_err());
        assert!(parse_urn("tel:#display").is_err());
    }
}
