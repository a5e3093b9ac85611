//! MIME type constants and detection for served assets.

use std::path::Path;

/// Common MIME type constants.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JSON: &str = "application/json";
    pub const SVG: &str = "image/svg+xml";
    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Guess MIME type from file extension.
pub fn from_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => types::HTML,
        Some("css") => types::CSS,
        Some("json") => types::JSON,
        Some("svg") => types::SVG,
        Some("txt") => types::PLAIN,
        _ => types::OCTET_STREAM,
    }
}
