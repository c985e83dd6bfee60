//! Same-site check on `Origin` / `Referer`.

use axum::http::{HeaderMap, header};

/// Whether the caller comes from the trusted host.
///
/// `allowed_host` must be non-empty and appear as a substring of a non-empty
/// `Origin` or `Referer` value. An unconfigured host denies every request.
pub fn is_authorized(origin: Option<&str>, referer: Option<&str>, allowed_host: &str) -> bool {
    if allowed_host.is_empty() {
        return false;
    }

    [origin, referer]
        .into_iter()
        .flatten()
        .any(|value| !value.is_empty() && value.contains(allowed_host))
}

/// [`is_authorized`] applied to request headers. Non-UTF-8 values count as absent.
pub fn is_request_authorized(headers: &HeaderMap, allowed_host: &str) -> bool {
    let get = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok());
    is_authorized(get(header::ORIGIN), get(header::REFERER), allowed_host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn origin_containing_host_is_authorized() {
        assert!(is_authorized(
            Some("https://trusted.example"),
            None,
            "trusted.example"
        ));
    }

    #[test]
    fn referer_containing_host_is_authorized() {
        assert!(is_authorized(
            None,
            Some("https://trusted.example/some/page?x=1"),
            "trusted.example"
        ));
    }

    #[test]
    fn either_header_is_enough() {
        assert!(is_authorized(
            Some("https://evil.example"),
            Some("https://trusted.example/"),
            "trusted.example"
        ));
    }

    #[test]
    fn unrelated_or_missing_headers_are_rejected() {
        assert!(!is_authorized(
            Some("https://evil.example"),
            Some("https://evil.example/page"),
            "trusted.example"
        ));
        assert!(!is_authorized(None, None, "trusted.example"));
        assert!(!is_authorized(Some(""), Some(""), "trusted.example"));
    }

    #[test]
    fn empty_allowed_host_denies_everyone() {
        assert!(!is_authorized(Some("https://anything.example"), None, ""));
        assert!(!is_authorized(
            Some("https://anything.example"),
            Some("https://anything.example/"),
            ""
        ));
        assert!(!is_authorized(None, None, ""));
    }

    #[test]
    fn header_map_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("Origin", HeaderValue::from_static("https://trusted.example"));
        assert!(is_request_authorized(&headers, "trusted.example"));

        let mut headers = HeaderMap::new();
        headers.insert("REFERER", HeaderValue::from_static("http://trusted.example/"));
        assert!(is_request_authorized(&headers, "trusted.example"));

        assert!(!is_request_authorized(&HeaderMap::new(), "trusted.example"));
    }

    #[test]
    fn non_utf8_header_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ORIGIN,
            HeaderValue::from_bytes(b"https://trusted.example/\xff").unwrap(),
        );
        assert!(!is_request_authorized(&headers, "trusted.example"));
    }
}
