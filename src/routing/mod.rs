//! Routing module
//!
//! Maps incoming request paths to (bundle, relative path, base href) using a
//! fixed-priority list of matchers.

mod resolver;

pub use resolver::{resolve, Resolution, RouteDecision};
