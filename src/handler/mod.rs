//! Request handler module
//!
//! Dispatches resolved routes to the bundle store, applies base-href
//! rewriting where an entry document is in play, and builds the response.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
