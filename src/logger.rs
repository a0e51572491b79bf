//! Logging helpers
//!
//! Plain stdout/stderr logging: startup banner, per-bundle build check,
//! access lines and error reporting. Access logging is gated by config.

use std::net::SocketAddr;

use chrono::Local;
use hyper::{Method, Uri, Version};

use crate::bundles::{BundleId, BundleSet};
use crate::config::Config;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Check every bundle's build directory and log its status.
///
/// A missing bundle is a warning, not a startup failure; the affected routes
/// answer with a diagnostic page until the build appears.
pub fn log_bundle_check(bundles: &BundleSet) -> bool {
    let mut all_present = true;
    println!("[Bundles] Checking build output...");
    for id in BundleId::ALL {
        let dir = bundles.dir(id);
        if dir.is_dir() {
            println!("[Bundles]   ok      {} ({})", id.name(), dir.display());
        } else {
            all_present = false;
            eprintln!("[WARN]    missing {} ({})", id.name(), dir.display());
        }
    }
    if !all_present {
        eprintln!("[WARN] Some bundles are missing. Run 'flutter build web --release' in each app folder.");
    }
    all_present
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("QR Menu static server started");
    println!("Listening on: http://{addr}");
    if config.logging.access_log {
        println!("Access log: enabled");
    }
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Routes (with dynamic base-href injection):");
    println!("  /root/*               -> system-admin");
    println!("  /{{slug}}/shopadmin/*   -> shop-admin");
    println!("  /{{slug}}/menu/*        -> client-panel");
    println!("  /{{slug}}/*             -> client-panel (tenant default)");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[{}] {method} {uri} {version:?}", timestamp());
}

pub fn log_response(status: u16, size: usize) {
    println!("[{}] -> {status} ({size} bytes)", timestamp());
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}
