//! Read-only access to the built application bundles.
//!
//! Each bundle is an immutable static-asset tree produced by an external
//! `flutter build web` step. The server never writes into a bundle; a missing
//! bundle directory is reported per request so a build finished mid-session
//! becomes servable without a restart.

use std::path::PathBuf;

use tokio::fs;

use crate::http::mime;

/// Root HTML document of every bundle, served for unresolved paths (SPA fallback).
pub const ENTRY_DOCUMENT: &str = "index.html";

/// Identity of one application bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleId {
    SystemAdmin,
    ShopAdmin,
    ClientPanel,
    Landing,
}

impl BundleId {
    pub const ALL: [Self; 4] = [
        Self::SystemAdmin,
        Self::ShopAdmin,
        Self::ClientPanel,
        Self::Landing,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::SystemAdmin => "system-admin",
            Self::ShopAdmin => "shop-admin",
            Self::ClientPanel => "client-panel",
            Self::Landing => "landing",
        }
    }

    /// Build output location, fixed relative to the project root.
    const fn rel_dir(self) -> &'static str {
        match self {
            Self::SystemAdmin => "apps/system_admin/build/web",
            Self::ShopAdmin => "apps/shop_admin/build/web",
            Self::ClientPanel => "apps/client_panel/build/web",
            Self::Landing => "apps/landing_page/build/web",
        }
    }
}

/// Outcome of a bundle lookup.
#[derive(Debug)]
pub enum Lookup {
    /// The relative path resolved to an existing file.
    File {
        content: Vec<u8>,
        content_type: &'static str,
    },
    /// The entry document, either requested directly or substituted as the
    /// SPA fallback. Eligible for base-href rewriting.
    EntryDocument { html: String },
    /// The bundle's root directory does not exist on disk.
    BundleMissing,
    /// The entry document exists but could not be read.
    EntryReadFailed(std::io::Error),
}

/// Resolves bundle identifiers to directories under one project root.
///
/// Constructed from configuration rather than process-wide constants so tests
/// can point an instance at a temporary fixture tree.
#[derive(Debug, Clone)]
pub struct BundleSet {
    project_root: PathBuf,
}

impl BundleSet {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Root directory of a bundle's asset tree.
    pub fn dir(&self, id: BundleId) -> PathBuf {
        self.project_root.join(id.rel_dir())
    }

    /// Whether `rel_path` exists inside the bundle (file or directory).
    ///
    /// Used by the route resolver to let landing-page assets co-located at
    /// the client bundle root win over tenant-slug interpretation.
    pub fn entry_exists(&self, id: BundleId, rel_path: &str) -> bool {
        self.dir(id).join(sanitize(rel_path)).exists()
    }

    /// Resolve a relative path within a bundle to its content.
    ///
    /// An empty path or one whose final segment has no `.` is treated as a
    /// client-side route and resolves to the entry document. A path that
    /// names no existing file also resolves to the entry document (SPA
    /// fallback). The bundle directory is re-checked on every call.
    pub async fn load(&self, id: BundleId, rel_path: &str) -> Lookup {
        let dir = self.dir(id);
        if !dir.is_dir() {
            return Lookup::BundleMissing;
        }

        let clean = sanitize(rel_path);
        if !is_entry_route(&clean) && clean != ENTRY_DOCUMENT {
            let file_path = dir.join(&clean);
            if let Ok(content) = fs::read(&file_path).await {
                let content_type =
                    mime::content_type_for(file_path.extension().and_then(|e| e.to_str()));
                return Lookup::File {
                    content,
                    content_type,
                };
            }
            // Fall through: unknown file paths get the entry document too.
        }

        match fs::read_to_string(dir.join(ENTRY_DOCUMENT)).await {
            Ok(html) => Lookup::EntryDocument { html },
            Err(e) => Lookup::EntryReadFailed(e),
        }
    }
}

/// Remove parent-directory components and leading slashes.
///
/// Slashes are trimmed after the `..` removal; a remainder with a leading
/// slash would make `Path::join` produce an absolute path.
fn sanitize(path: &str) -> String {
    path.replace("..", "").trim_start_matches('/').to_string()
}

/// Whether a relative path denotes the entry document rather than a file.
///
/// The dot heuristic mirrors the route table: no `.` in the final segment
/// means a client-side route. A real route containing a literal dot (e.g.
/// `v1.2`) is misclassified as a file request; see DESIGN.md.
pub fn is_entry_route(rel_path: &str) -> bool {
    match rel_path.rsplit('/').next() {
        Some(last) => !last.contains('.'),
        None => true,
    }
}
