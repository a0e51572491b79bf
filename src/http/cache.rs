//! HTTP cache control module
//!
//! Provides `ETag` generation and conditional request handling for raw
//! bundle files. Entry documents are never cached this way since their bytes
//! depend on the requested route.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from file content using fast hashing.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check the client's `If-None-Match` header against the server's `ETag`.
///
/// Handles comma-separated lists and the `*` wildcard. Returns true when a
/// 304 should be sent.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_etag() {
        let etag = generate_etag(b"hello world");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
    }

    #[test]
    fn test_etag_tracks_content() {
        assert_eq!(generate_etag(b"same content"), generate_etag(b"same content"));
        assert_ne!(generate_etag(b"content a"), generate_etag(b"content b"));
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }
}
