//! HTTP protocol layer module
//!
//! Response builders, MIME detection and ETag handling, decoupled from the
//! bundle-serving business logic.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_bundle_missing_response, build_entry_read_error_response, build_html_response,
    build_method_not_allowed_response, build_not_found_response,
};
