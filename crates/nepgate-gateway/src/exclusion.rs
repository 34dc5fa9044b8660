//! Fixed exclusion list
//!
//! Paths that never reach the gateway's decision logic: API routes,
//! build/static assets, and well-known files. These short-circuit
//! straight into the application regardless of host.

/// Prefixes excluded from gateway processing.
const EXCLUDED_PREFIXES: &[&str] = &["/api", "/static", "/assets"];

/// Well-known files excluded from gateway processing.
const EXCLUDED_FILES: &[&str] = &["/favicon.ico", "/sitemap.xml", "/robots.txt"];

/// Image extensions served as-is from any path.
const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".ico"];

/// Whether the gateway must leave `path` entirely alone.
pub fn is_excluded(path: &str) -> bool {
    if EXCLUDED_FILES.contains(&path) {
        return true;
    }
    if EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{}/", prefix)))
    {
        return true;
    }
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
