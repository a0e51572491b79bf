//! Tenant route resolution.
//!
//! Classifies a request path into exactly one route class. Matchers are held
//! in an explicit slice and evaluated in fixed priority order; slug-based and
//! reserved routes collide syntactically, so the order is load-bearing.

use crate::bundles::{BundleId, BundleSet};

/// Path segments that must never be interpreted as tenant slugs.
pub const RESERVED_NAMES: [&str; 7] = [
    "root",
    "api",
    "static",
    "assets",
    "favicon.ico",
    "flutter_bootstrap.js",
    "main.dart.js",
];

pub fn is_reserved(segment: &str) -> bool {
    RESERVED_NAMES.contains(&segment)
}

/// Resolved outcome of a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub bundle: BundleId,
    /// Path within the bundle; empty means the entry document.
    pub rel_path: String,
    /// Base href to inject when the entry document is served. Always starts
    /// and ends with `/` when present.
    pub base_href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Serve(Resolution),
    NotFound,
}

struct RouteRequest<'a> {
    segments: Vec<&'a str>,
    bundles: &'a BundleSet,
}

impl RouteRequest<'_> {
    fn slug(&self) -> Option<&str> {
        self.segments.first().copied()
    }
}

type Matcher = fn(&RouteRequest<'_>) -> Option<RouteDecision>;

/// Route classes in priority order; the first matcher to return a decision
/// wins.
const MATCHERS: [Matcher; 7] = [
    match_landing_root,
    match_system_admin,
    match_shop_admin,
    match_client_menu,
    match_global_assets,
    match_tenant_default,
    match_reserved_fallthrough,
];

/// Map a request path to a bundle, a relative file path and a base href.
///
/// The bundle set is consulted only for the single-segment tenant-default
/// case, where a file co-located at the client bundle root (a landing-page
/// asset) wins over slug interpretation.
pub fn resolve(path: &str, bundles: &BundleSet) -> RouteDecision {
    let req = RouteRequest {
        segments: path.split('/').filter(|s| !s.is_empty()).collect(),
        bundles,
    };
    for matcher in MATCHERS {
        if let Some(decision) = matcher(&req) {
            return decision;
        }
    }
    RouteDecision::NotFound
}

fn serve(bundle: BundleId, rel_path: String, base_href: Option<String>) -> Option<RouteDecision> {
    Some(RouteDecision::Serve(Resolution {
        bundle,
        rel_path,
        base_href,
    }))
}

/// Rule 1: `/` serves the landing page out of the client-panel bundle.
fn match_landing_root(req: &RouteRequest<'_>) -> Option<RouteDecision> {
    if !req.segments.is_empty() {
        return None;
    }
    serve(BundleId::ClientPanel, String::new(), Some("/".to_string()))
}

/// Rule 2: `/root[/...]` is the system-admin application.
fn match_system_admin(req: &RouteRequest<'_>) -> Option<RouteDecision> {
    if req.slug()? != "root" {
        return None;
    }
    serve(
        BundleId::SystemAdmin,
        req.segments[1..].join("/"),
        Some("/root/".to_string()),
    )
}

/// Rule 3: `/{slug}/shopadmin[/...]` for non-reserved slugs.
fn match_shop_admin(req: &RouteRequest<'_>) -> Option<RouteDecision> {
    match_slug_app(req, "shopadmin", BundleId::ShopAdmin)
}

/// Rule 4: `/{slug}/menu[/...]` for non-reserved slugs.
fn match_client_menu(req: &RouteRequest<'_>) -> Option<RouteDecision> {
    match_slug_app(req, "menu", BundleId::ClientPanel)
}

fn match_slug_app(
    req: &RouteRequest<'_>,
    keyword: &str,
    bundle: BundleId,
) -> Option<RouteDecision> {
    let slug = req.slug()?;
    if is_reserved(slug) || req.segments.get(1) != Some(&keyword) {
        return None;
    }
    serve(
        bundle,
        req.segments[2..].join("/"),
        Some(format!("/{slug}/{keyword}/")),
    )
}

/// Rule 5: `/assets/...` falls back to the client-panel bundle's asset tree
/// with no base-href injection.
fn match_global_assets(req: &RouteRequest<'_>) -> Option<RouteDecision> {
    if req.slug()? != "assets" || req.segments.len() < 2 {
        return None;
    }
    serve(BundleId::ClientPanel, req.segments.join("/"), None)
}

/// Rule 6: `/{slug}[/...]` is a tenant's client application.
fn match_tenant_default(req: &RouteRequest<'_>) -> Option<RouteDecision> {
    let slug = req.slug()?;

    if req.segments.len() == 1 {
        // A file of this exact name at the client bundle root is a
        // landing-page asset and is served literally. The existence check
        // precedes both the reserved check and slug interpretation, but only
        // for single-segment paths.
        if req.bundles.entry_exists(BundleId::ClientPanel, slug) {
            return serve(
                BundleId::ClientPanel,
                slug.to_string(),
                Some("/".to_string()),
            );
        }
        if is_reserved(slug) {
            return None;
        }
        return serve(BundleId::ClientPanel, String::new(), Some(format!("/{slug}/")));
    }

    if is_reserved(slug) {
        return None;
    }

    let base_href = Some(format!("/{slug}/"));
    let sub_path = req.segments[1..].join("/");
    if sub_path.rsplit('/').next().is_some_and(|last| last.contains('.')) {
        // Dot in the final segment: a literal asset path under the tenant base.
        serve(BundleId::ClientPanel, sub_path, base_href)
    } else {
        // No dot: a client-side route; the sub-path is ignored.
        serve(BundleId::ClientPanel, String::new(), base_href)
    }
}

/// Rule 7: reserved first segments unmatched by rules 1-5 are dead ends.
fn match_reserved_fallthrough(req: &RouteRequest<'_>) -> Option<RouteDecision> {
    if is_reserved(req.slug()?) {
        return Some(RouteDecision::NotFound);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn empty_bundles() -> (TempDir, BundleSet) {
        let tmp = TempDir::new().unwrap();
        let set = BundleSet::new(tmp.path());
        (tmp, set)
    }

    fn expect_serve(decision: RouteDecision) -> Resolution {
        match decision {
            RouteDecision::Serve(r) => r,
            RouteDecision::NotFound => panic!("expected a serveable route"),
        }
    }

    #[test]
    fn reserved_set_rejects_system_segments_only() {
        for name in RESERVED_NAMES {
            assert!(is_reserved(name));
        }
        assert!(!is_reserved("acme"));
        assert!(!is_reserved("Root")); // case-sensitive, like the route table
    }

    #[test]
    fn root_path_serves_landing() {
        let (_tmp, bundles) = empty_bundles();
        let r = expect_serve(resolve("/", &bundles));
        assert_eq!(r.bundle, BundleId::ClientPanel);
        assert_eq!(r.rel_path, "");
        assert_eq!(r.base_href.as_deref(), Some("/"));
    }

    #[test]
    fn root_prefix_serves_system_admin() {
        let (_tmp, bundles) = empty_bundles();
        for path in ["/root", "/root/", "/root/users/42"] {
            let r = expect_serve(resolve(path, &bundles));
            assert_eq!(r.bundle, BundleId::SystemAdmin);
            assert_eq!(r.base_href.as_deref(), Some("/root/"));
        }
        let r = expect_serve(resolve("/root/main.dart.js", &bundles));
        assert_eq!(r.rel_path, "main.dart.js");
    }

    #[test]
    fn shopadmin_routes_carry_slug_base() {
        let (_tmp, bundles) = empty_bundles();
        let r = expect_serve(resolve("/acme/shopadmin", &bundles));
        assert_eq!(r.bundle, BundleId::ShopAdmin);
        assert_eq!(r.rel_path, "");
        assert_eq!(r.base_href.as_deref(), Some("/acme/shopadmin/"));

        let r = expect_serve(resolve("/acme/shopadmin/flutter.js", &bundles));
        assert_eq!(r.rel_path, "flutter.js");
    }

    #[test]
    fn menu_routes_target_client_panel() {
        let (_tmp, bundles) = empty_bundles();
        let r = expect_serve(resolve("/acme/menu/", &bundles));
        assert_eq!(r.bundle, BundleId::ClientPanel);
        assert_eq!(r.base_href.as_deref(), Some("/acme/menu/"));
    }

    #[test]
    fn reserved_slug_before_app_keyword_is_rejected() {
        let (_tmp, bundles) = empty_bundles();
        assert_eq!(resolve("/api/shopadmin", &bundles), RouteDecision::NotFound);
        assert_eq!(resolve("/static/menu/x", &bundles), RouteDecision::NotFound);
    }

    #[test]
    fn global_assets_bypass_base_injection() {
        let (_tmp, bundles) = empty_bundles();
        let r = expect_serve(resolve("/assets/fonts/Roboto.ttf", &bundles));
        assert_eq!(r.bundle, BundleId::ClientPanel);
        assert_eq!(r.rel_path, "assets/fonts/Roboto.ttf");
        assert_eq!(r.base_href, None);
    }

    #[test]
    fn assets_slug_with_shopadmin_still_hits_asset_route() {
        // "assets" is reserved, so rule 3 declines and rule 5 wins.
        let (_tmp, bundles) = empty_bundles();
        let r = expect_serve(resolve("/assets/shopadmin", &bundles));
        assert_eq!(r.rel_path, "assets/shopadmin");
        assert_eq!(r.base_href, None);
    }

    #[test]
    fn single_segment_tenant_gets_entry_document() {
        let (_tmp, bundles) = empty_bundles();
        let r = expect_serve(resolve("/acme", &bundles));
        assert_eq!(r.bundle, BundleId::ClientPanel);
        assert_eq!(r.rel_path, "");
        assert_eq!(r.base_href.as_deref(), Some("/acme/"));
    }

    #[test]
    fn single_segment_file_wins_over_slug() {
        let (tmp, bundles) = empty_bundles();
        let web = tmp.path().join("apps/client_panel/build/web");
        fs::create_dir_all(&web).unwrap();
        fs::write(web.join("flutter_bootstrap.js"), "// boot").unwrap();

        let r = expect_serve(resolve("/flutter_bootstrap.js", &bundles));
        assert_eq!(r.rel_path, "flutter_bootstrap.js");
        assert_eq!(r.base_href.as_deref(), Some("/"));
    }

    #[test]
    fn reserved_single_segment_without_file_is_not_found() {
        let (_tmp, bundles) = empty_bundles();
        assert_eq!(resolve("/favicon.ico", &bundles), RouteDecision::NotFound);
        assert_eq!(resolve("/api", &bundles), RouteDecision::NotFound);
    }

    #[test]
    fn multi_segment_skips_existence_check() {
        // Even if the file existed, multi-segment paths classify by shape only.
        let (tmp, bundles) = empty_bundles();
        let web = tmp.path().join("apps/client_panel/build/web/docs");
        fs::create_dir_all(&web).unwrap();
        fs::write(web.join("terms"), "text").unwrap();

        let r = expect_serve(resolve("/docs/terms", &bundles));
        assert_eq!(r.rel_path, "");
        assert_eq!(r.base_href.as_deref(), Some("/docs/"));
    }

    #[test]
    fn dot_heuristic_classifies_sub_paths() {
        let (_tmp, bundles) = empty_bundles();

        let r = expect_serve(resolve("/acme/assets/logo.png", &bundles));
        assert_eq!(r.rel_path, "assets/logo.png");
        assert_eq!(r.base_href.as_deref(), Some("/acme/"));

        let r = expect_serve(resolve("/acme/orders/open", &bundles));
        assert_eq!(r.rel_path, "");
        assert_eq!(r.base_href.as_deref(), Some("/acme/"));

        // Documented limitation: a literal dot in a route segment is taken
        // for a file request.
        let r = expect_serve(resolve("/acme/v1.2", &bundles));
        assert_eq!(r.rel_path, "v1.2");
    }

    #[test]
    fn reserved_multi_segment_fallthrough_is_not_found() {
        let (_tmp, bundles) = empty_bundles();
        for path in ["/api/orders", "/static/css/app.css", "/favicon.ico/x"] {
            assert_eq!(resolve(path, &bundles), RouteDecision::NotFound, "{path}");
        }
    }

    #[test]
    fn trailing_slashes_do_not_change_classification() {
        let (_tmp, bundles) = empty_bundles();
        assert_eq!(
            resolve("/acme/menu", &bundles),
            resolve("/acme/menu/", &bundles)
        );
        assert_eq!(resolve("/acme", &bundles), resolve("/acme/", &bundles));
    }
}
