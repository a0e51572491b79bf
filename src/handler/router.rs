//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, route resolution, and dispatching to the bundle store.

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::routing::{self, RouteDecision};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use super::static_files;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub access_log: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let is_head = *method == Method::HEAD;

    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(method, uri, req.version());
    }

    // GET only (HEAD rides along with an elided body)
    if let Some(resp) = check_http_method(method) {
        return Ok(resp);
    }

    let ctx = RequestContext {
        path: uri.path(),
        is_head,
        if_none_match: req
            .headers()
            .get("if-none-match")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
        access_log,
    };

    Ok(dispatch(&ctx, &state).await)
}

/// Check HTTP method and reject everything except GET/HEAD
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_method_not_allowed_response())
        }
    }
}

/// Resolve the path and serve the matched bundle.
///
/// Reserved-name collisions short-circuit to a 404 here, before the bundle
/// store is touched.
pub async fn dispatch(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match routing::resolve(ctx.path, &state.bundles) {
        RouteDecision::Serve(resolution) => {
            static_files::serve_bundle(ctx, &resolution, state).await
        }
        RouteDecision::NotFound => {
            if ctx.access_log {
                logger::log_response(404, 0);
            }
            http::build_not_found_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Method;

    #[test]
    fn get_and_head_pass_the_method_gate() {
        assert!(check_http_method(&Method::GET).is_none());
        assert!(check_http_method(&Method::HEAD).is_none());
    }

    #[test]
    fn mutating_methods_are_rejected() {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS] {
            let resp = check_http_method(&method).expect("should be rejected");
            assert_eq!(resp.status(), 405);
        }
    }
}
