//! Root-domain guard
//!
//! When a request lands on the apex domain and an existing session names
//! a home tenant, protected paths (admin UI, builder) redirect to that
//! tenant's subdomain with path and query preserved. Without a home
//! tenant the guard is a no-op and the apex serves the path directly
//! (login/marketing surface).

use nepgate_core::host::is_local_host;
use nepgate_core::{GatewayConfig, RouteAction, TenantSlug, Topology};
use tracing::debug;

/// Path prefixes that belong on a tenant subdomain, not the apex.
const PROTECTED_PREFIXES: &[&str] = &["/admin", "/builder"];

/// Guard for protected paths on the apex domain.
#[derive(Debug, Clone)]
pub struct RootDomainGuard {
    protected: Vec<String>,
}

impl Default for RootDomainGuard {
    fn default() -> Self {
        Self {
            protected: PROTECTED_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl RootDomainGuard {
    /// Build a guard with an explicit protected-prefix list.
    pub fn new(protected: Vec<String>) -> Self {
        Self { protected }
    }

    /// Redirect a protected apex request to the user's home tenant.
    ///
    /// Returns `None` (no-op) unless the request is on the apex
    /// surface (the apex domain, or bare localhost standing in for it
    /// during development), a home tenant is known, and the path is
    /// protected. `host` is the original request host, with port, used
    /// to rebuild local development targets. Callers invoke this only
    /// for requests that resolved no tenant of their own.
    pub fn guard(
        &self,
        topology: Topology,
        host: &str,
        path: &str,
        query: Option<&str>,
        home_tenant: Option<&TenantSlug>,
        config: &GatewayConfig,
    ) -> Option<RouteAction> {
        if !matches!(topology, Topology::Apex | Topology::Local) {
            return None;
        }
        let tenant = home_tenant?;
        if !self.is_protected(path) {
            return None;
        }

        // Local development keeps http and the original port; production
        // goes to https on the tenant subdomain.
        let target = if is_local_host(host) {
            format!("http://{}.{}{}", tenant.as_str(), host, path)
        } else {
            format!(
                "https://{}.{}{}",
                tenant.as_str(),
                config.root_domain,
                path
            )
        };
        let target = match query {
            Some(q) if !q.is_empty() => format!("{}?{}", target, q),
            _ => target,
        };

        debug!(tenant = %tenant, path = %path, target = %target, "redirecting apex request to home tenant");
        Some(RouteAction::Redirect { target })
    }

    fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|prefix| {
            path == prefix
                || path.strip_prefix(prefix.as_str()).is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Validate that protected prefixes look like absolute paths.
    pub fn validate(&self) -> nepgate_core::Result<()> {
        for prefix in &self.protected {
            if !prefix.starts_with('/') {
                return Err(nepgate_core::Error::ConfigValidation(format!(
                    "protected prefix '{}' must start with '/'",
                    prefix
                )));
            }
        }
        Ok(())
    }
}
