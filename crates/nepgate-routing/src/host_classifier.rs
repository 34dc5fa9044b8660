//! Host classification
//!
//! Derives the tenant identity and deployment topology from the inbound
//! host name. Resolution order (first match wins):
//!
//! 1. Local development: `<label>.localhost` (any port)
//! 2. Ephemeral preview: `<tenant>---<build>.<preview suffix>`
//! 3. Apex: the root domain or its `www` alias
//! 4. Tenant subdomain: `<tenant>.<root domain>`
//! 5. Fail-safe: unrecognized hosts are treated as the apex; a tenant
//!    is never invented for a host the platform does not recognize.

use nepgate_core::host::strip_port;
use nepgate_core::{GatewayConfig, TenantSlug, Topology};
use tracing::warn;

/// Separator between the tenant label and the build id in ephemeral
/// preview host names.
const PREVIEW_SEPARATOR: &str = "---";

/// Classify a host name into `(tenant, topology)`.
///
/// Pure function of the host and the immutable config; safe to call per
/// request. The host may carry a port; comparison is case-insensitive.
pub fn classify(host: &str, config: &GatewayConfig) -> (Option<TenantSlug>, Topology) {
    let host = strip_port(host).to_ascii_lowercase();

    // 1. Local development
    if host == "localhost" {
        return (None, Topology::Local);
    }
    if let Some(label) = host.strip_suffix(".localhost") {
        match TenantSlug::new(label) {
            Ok(slug) => return (Some(slug), Topology::Local),
            Err(e) => warn!(host = %host, error = %e, "invalid local tenant label"),
        }
    }

    // 2. Ephemeral preview deployment
    let preview_suffix = format!(".{}", config.preview_suffix().to_ascii_lowercase());
    if host.contains(PREVIEW_SEPARATOR) && host.ends_with(&preview_suffix) {
        let label = host.split(PREVIEW_SEPARATOR).next().unwrap_or_default();
        match TenantSlug::new(label) {
            Ok(slug) => return (Some(slug), Topology::EphemeralPreview),
            Err(e) => warn!(host = %host, error = %e, "invalid preview tenant label"),
        }
    }

    // 3. Apex domain (and its www alias)
    let root = config.root_domain.to_ascii_lowercase();
    if host == root || host == format!("www.{}", root) {
        return (None, Topology::Apex);
    }

    // 4. Tenant subdomain
    if let Some(label) = host.strip_suffix(&format!(".{}", root)) {
        match TenantSlug::new(label) {
            Ok(slug) => return (Some(slug), Topology::TenantSubdomain),
            Err(e) => warn!(host = %host, error = %e, "invalid subdomain tenant label"),
        }
    }

    // 5. Fail-safe
    (None, Topology::Apex)
}
