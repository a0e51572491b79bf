//! Base-href injection for SPA entry documents.
//!
//! Each bundle ships with a `<base href>` baked in at build time; the value
//! depends on the route the request arrived through, so it is replaced per
//! request. Everything else in the document passes through byte-for-byte.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use hyper::body::Bytes;
use regex::{NoExpand, Regex};

use crate::bundles::BundleId;

fn base_href_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"<base\s+href="[^"]*""#).expect("invalid base-href regex"))
}

/// Replace the document's base-href declaration with `base_href`.
///
/// Matches the declaration regardless of surrounding whitespace or its
/// current value. Only the first occurrence is touched; similar text later in
/// the body stays intact. Idempotent for a fixed `base_href`.
pub fn rewrite_base_href(html: &str, base_href: &str) -> String {
    let replacement = format!(r#"<base href="{base_href}""#);
    base_href_pattern()
        .replace(html, NoExpand(&replacement))
        .into_owned()
}

/// Rewritten entry documents keyed by (bundle, base href).
///
/// Bundle trees are treated as immutable for the server's lifetime, so
/// entries are never invalidated. Concurrent requests may race to populate
/// the same key; the inserts are byte-identical, so last-writer-wins is fine.
#[derive(Debug, Default)]
pub struct RewriteCache {
    entries: RwLock<HashMap<(BundleId, String), Bytes>>,
}

impl RewriteCache {
    pub fn get(&self, bundle: BundleId, base_href: &str) -> Option<Bytes> {
        self.entries
            .read()
            .unwrap()
            .get(&(bundle, base_href.to_string()))
            .cloned()
    }

    pub fn insert(&self, bundle: BundleId, base_href: &str, html: Bytes) {
        self.entries
            .write()
            .unwrap()
            .insert((bundle, base_href.to_string()), html);
    }
}
