//! Route decision engine
//!
//! Combines the resolved tenant, the exemption policy, and the request
//! path into exactly one `RouteAction`. Two instantiations exist side by
//! side (preview edge, publish edge); each owns its namespace literal
//! and exemption list.
//!
//! The engine is idempotent by construction: applied to its own rewrite
//! output it produces a redirect back to the original path, never a
//! second rewrite.

use nepgate_core::{Namespace, RouteAction, TenantSlug};
use tracing::debug;

use crate::path_policy::PathPolicy;

/// Decision engine for one route namespace.
#[derive(Debug, Clone)]
pub struct RouteDecisionEngine {
    namespace: Namespace,
    policy: PathPolicy,
}

impl RouteDecisionEngine {
    /// Build an engine with an explicit exemption policy.
    pub fn new(namespace: Namespace, policy: PathPolicy) -> Self {
        Self { namespace, policy }
    }

    /// Build an engine with the default exemption list for `namespace`.
    pub fn with_defaults(namespace: Namespace) -> Self {
        Self::new(namespace, PathPolicy::for_namespace(namespace))
    }

    /// The namespace this engine rewrites into.
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Decide the routing outcome for `path` on a host that resolved to
    /// `tenant`.
    pub fn decide(&self, tenant: Option<&TenantSlug>, path: &str) -> RouteAction {
        // The apex serves its own routes unmodified.
        let Some(tenant) = tenant else {
            return RouteAction::Passthrough;
        };

        if self.policy.is_exempt(path) {
            return RouteAction::Passthrough;
        }

        // A tenant must never see the internal namespace in its own URL
        // bar; redirecting here also terminates the rewrite cycle.
        let prefix = format!("/{}/{}", self.namespace.as_str(), tenant.as_str());
        if let Some(rest) = strip_prefix_at_boundary(path, &prefix) {
            let target = if rest.is_empty() { "/" } else { rest };
            debug!(tenant = %tenant, path = %path, target = %target, "canonicalizing namespaced path");
            return RouteAction::Redirect {
                target: target.to_string(),
            };
        }

        let internal_path = format!("{}{}", prefix, path);
        debug!(tenant = %tenant, path = %path, internal_path = %internal_path, "rewriting into namespace");
        RouteAction::Rewrite { internal_path }
    }
}

/// Strip `prefix` from `path` when it matches at a segment boundary.
fn strip_prefix_at_boundary<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}
