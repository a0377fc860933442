//! URL canonicalization and origin helpers for consistent caching.

/// Error type for URL handling failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize a URL string for consistent cache keying.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(mut host) = parsed.host_str() {
        let h = host.to_lowercase();
        host = h.as_str();
        parsed
            .set_host(Some(host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Resolve an absolute asset path against the application origin.
pub fn resolve_asset(origin: &url::Url, path: &str) -> Result<url::Url, UrlError> {
    if path.is_empty() {
        return Err(UrlError::Empty);
    }
    origin.join(path).map_err(|e| UrlError::InvalidUrl(e.to_string()))
}

/// Whether two URLs share scheme, host, and port.
pub fn same_origin(a: &url::Url, b: &url::Url) -> bool {
    a.origin() == b.origin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_basic() {
        let url = canonicalize("https://app.example").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("app.example"));
    }

    #[test]
    fn test_canonicalize_default_scheme() {
        let url = canonicalize("app.example").unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_canonicalize_lowercase_host() {
        let url = canonicalize("https://APP.EXAMPLE").unwrap();
        assert_eq!(url.host_str(), Some("app.example"));
    }

    #[test]
    fn test_canonicalize_remove_fragment() {
        let url = canonicalize("https://app.example/index.html#top").unwrap();
        assert_eq!(url.fragment(), None);
        assert_eq!(url.path(), "/index.html");
    }

    #[test]
    fn test_canonicalize_preserve_query() {
        let url = canonicalize("https://app.example?a=1&b=2").unwrap();
        assert_eq!(url.query(), Some("a=1&b=2"));
    }

    #[test]
    fn test_canonicalize_unsupported_scheme() {
        let result = canonicalize("file:///etc/passwd");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_canonicalize_empty() {
        assert!(matches!(canonicalize(""), Err(UrlError::Empty)));
        assert!(matches!(canonicalize("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_resolve_asset_root() {
        let origin = url::Url::parse("https://app.example").unwrap();
        let url = resolve_asset(&origin, "/").unwrap();
        assert_eq!(url.as_str(), "https://app.example/");
    }

    #[test]
    fn test_resolve_asset_path() {
        let origin = url::Url::parse("https://app.example").unwrap();
        let url = resolve_asset(&origin, "/manifest.webmanifest").unwrap();
        assert_eq!(url.as_str(), "https://app.example/manifest.webmanifest");
    }

    #[test]
    fn test_resolve_asset_empty() {
        let origin = url::Url::parse("https://app.example").unwrap();
        assert!(matches!(resolve_asset(&origin, ""), Err(UrlError::Empty)));
    }

    #[test]
    fn test_same_origin() {
        let a = url::Url::parse("https://app.example/a.css").unwrap();
        let b = url::Url::parse("https://app.example/deep/b.js").unwrap();
        let other = url::Url::parse("https://cdn.example/a.css").unwrap();
        assert!(same_origin(&a, &b));
        assert!(!same_origin(&a, &other));
    }

    #[test]
    fn test_same_origin_distinguishes_port() {
        let a = url::Url::parse("http://localhost:8080/").unwrap();
        let b = url::Url::parse("http://localhost:9090/").unwrap();
        assert!(!same_origin(&a, &b));
    }
}
