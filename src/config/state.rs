// Application state module
// Immutable per-process state shared across request tasks

use crate::bundles::BundleSet;
use crate::rewrite::RewriteCache;

use super::types::Config;

/// Application state
///
/// Requests only read from it; the rewrite cache guards its own interior
/// mutability.
pub struct AppState {
    pub config: Config,
    pub bundles: BundleSet,
    pub rewrite_cache: RewriteCache,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            bundles: BundleSet::new(&config.bundles.project_root),
            rewrite_cache: RewriteCache::default(),
            config: config.clone(),
        }
    }
}
