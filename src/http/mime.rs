//! MIME type detection module
//!
//! Maps file extensions found in Flutter web build output to Content-Type
//! values. Anything unrecognized is served as an opaque binary.

/// Get MIME Content-Type based on file extension
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt") => "text/plain; charset=utf-8",

        // JavaScript/WASM (flutter.js, main.dart.js, *.wasm)
        Some("js" | "mjs") => "application/javascript",
        Some("json" | "map") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        _ => "application/octet-stream",
    }
}
