//! Host-name normalization helpers
//!
//! Host names arrive from the `Host` header and may carry a port suffix.
//! All classification compares against the port-stripped, lowercased
//! form; the original value (with port) is kept only for reconstructing
//! local-development redirect targets.

/// Strip the `:port` suffix from a host name, if present.
pub fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        // Only treat the suffix as a port when it is all digits, so
        // IPv6 literals without brackets are left alone.
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Whether a host (port allowed) is a local-development host.
///
/// Matches bare `localhost` and any `<label>.localhost` form.
pub fn is_local_host(host: &str) -> bool {
    let host = strip_port(host);
    host.eq_ignore_ascii_case("localhost")
        || host.to_ascii_lowercase().ends_with(".localhost")
}
