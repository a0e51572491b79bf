//! Bundle file serving module
//!
//! Handles bundle lookups, SPA fallback, base-href rewriting and response
//! building for resolved routes.

use crate::bundles::{self, Lookup};
use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, cache};
use crate::logger;
use crate::rewrite;
use crate::routing::Resolution;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Serve a resolved route from its bundle.
pub async fn serve_bundle(
    ctx: &RequestContext<'_>,
    resolution: &Resolution,
    state: &AppState,
) -> Response<Full<Bytes>> {
    // Fast path: a previously rewritten entry document for this
    // (bundle, base href) pair. Only entry-document routes qualify; literal
    // file paths must hit the disk.
    if let Some(base_href) = &resolution.base_href {
        if bundles::is_entry_route(&resolution.rel_path) {
            if let Some(html) = state.rewrite_cache.get(resolution.bundle, base_href) {
                return respond_html(ctx, html);
            }
        }
    }

    match state.bundles.load(resolution.bundle, &resolution.rel_path).await {
        Lookup::File {
            content,
            content_type,
        } => respond_file(ctx, content, content_type),
        Lookup::EntryDocument { html } => {
            let body = match &resolution.base_href {
                Some(base_href) => {
                    let rewritten = Bytes::from(rewrite::rewrite_base_href(&html, base_href));
                    if bundles::is_entry_route(&resolution.rel_path) {
                        state
                            .rewrite_cache
                            .insert(resolution.bundle, base_href, rewritten.clone());
                    }
                    rewritten
                }
                None => Bytes::from(html),
            };
            respond_html(ctx, body)
        }
        Lookup::BundleMissing => {
            logger::log_warning(&format!(
                "Bundle '{}' has no build output at {}",
                resolution.bundle.name(),
                state.bundles.dir(resolution.bundle).display()
            ));
            if ctx.access_log {
                logger::log_response(500, 0);
            }
            http::build_bundle_missing_response(resolution.bundle.name())
        }
        Lookup::EntryReadFailed(e) => {
            logger::log_error(&format!(
                "Failed to read entry document of bundle '{}': {e}",
                resolution.bundle.name()
            ));
            if ctx.access_log {
                logger::log_response(500, 0);
            }
            http::build_entry_read_error_response(resolution.bundle.name())
        }
    }
}

fn respond_html(ctx: &RequestContext<'_>, html: Bytes) -> Response<Full<Bytes>> {
    if ctx.access_log {
        logger::log_response(200, html.len());
    }
    http::build_html_response(html, ctx.is_head)
}

fn respond_file(
    ctx: &RequestContext<'_>,
    content: Vec<u8>,
    content_type: &str,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&content);
    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        if ctx.access_log {
            logger::log_response(304, 0);
        }
        return http::response::build_not_modified_response(&etag);
    }

    if ctx.access_log {
        logger::log_response(200, content.len());
    }
    http::response::build_file_response(Bytes::from(content), content_type, &etag, ctx.is_head)
}
