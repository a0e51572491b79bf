//! HTTP response building module
//!
//! Provides builders for the router's response surface, decoupled from
//! bundle lookup and rewriting logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 404 Not Found response.
///
/// The body is the bare text `Not found`: reserved-name collisions get no
/// diagnostic detail.
pub fn build_not_found_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from_static(b"Not found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from_static(b"Not found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_method_not_allowed_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD")
        .body(Full::new(Bytes::from_static(b"405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from_static(b"405 Method Not Allowed")))
        })
}

/// Build the 500 diagnostic served when a bundle was never built.
///
/// Distinguishes "never built" from "route not found"; the page tells the
/// operator how to produce the missing build output.
pub fn build_bundle_missing_response(bundle_name: &str) -> Response<Full<Bytes>> {
    let html = format!(
        "<h1>Build Not Found</h1>\
         <p>The <code>{bundle_name}</code> bundle has not been built.</p>\
         <p>Run: <code>flutter build web --release</code> in the app folder, \
         then retry this request.</p>"
    );
    build_500_html(html)
}

/// Build the 500 diagnostic for an unreadable entry document.
pub fn build_entry_read_error_response(bundle_name: &str) -> Response<Full<Bytes>> {
    let html = format!(
        "<h1>Internal Server Error</h1>\
         <p>Failed to read the entry document of the <code>{bundle_name}</code> bundle.</p>"
    );
    build_500_html(html)
}

fn build_500_html(html: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Full::new(Bytes::from(html)))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 200 HTML response for entry documents.
///
/// Entry-document bytes depend on the route they were requested through, so
/// shared caches must not store them.
pub fn build_html_response(content: Bytes, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head { Bytes::new() } else { content };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .header("Cache-Control", "no-cache")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 200 response for a raw bundle file with cache validators.
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 304 Not Modified response
pub fn build_not_modified_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_body_is_exact() {
        let resp = build_not_found_response();
        assert_eq!(resp.status(), 404);
    }

    #[test]
    fn bundle_missing_carries_guidance() {
        let resp = build_bundle_missing_response("client-panel");
        assert_eq!(resp.status(), 500);
        assert_eq!(
            resp.headers()["Content-Type"],
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn head_html_response_has_empty_body_but_full_length() {
        let resp = build_html_response(Bytes::from_static(b"<html></html>"), true);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "13");
    }
}
