//! Path exemption policy
//!
//! A fixed, ordered list of path prefixes that always pass through the
//! gateway unmodified, whatever tenant the request resolved to. This
//! keeps internal tooling (admin UI, builder, payment callbacks,
//! support/onboarding/subscription flows) out of tenant namespaces and
//! prevents the two decision engines from rewriting into each other's
//! prefix.

use nepgate_core::Namespace;

/// Base prefixes exempt on both edges.
const BASE_EXEMPT_PREFIXES: &[&str] = &[
    "/admin",
    "/builder",
    "/payment",
    "/support",
    "/onboarding",
    "/subscription",
];

/// Prefix exemption table for one decision engine.
#[derive(Debug, Clone)]
pub struct PathPolicy {
    prefixes: Vec<String>,
}

impl PathPolicy {
    /// Build a policy from an explicit prefix list.
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// Default policy for the engine serving `namespace`.
    ///
    /// Exempts the shared internal surfaces plus the *other* namespace's
    /// prefix. The engine's own prefix is intentionally absent: paths
    /// already namespaced under the current tenant are canonicalized by
    /// the engine itself (redirect, not passthrough).
    pub fn for_namespace(namespace: Namespace) -> Self {
        let mut prefixes: Vec<String> = BASE_EXEMPT_PREFIXES
            .iter()
            .map(|p| p.to_string())
            .collect();
        prefixes.push(format!("/{}", namespace.other().as_str()));
        Self { prefixes }
    }

    /// Whether `path` falls under an exempt prefix.
    ///
    /// Matching respects segment boundaries: `/admin` covers `/admin`
    /// and `/admin/users`, never `/administrator`.
    pub fn is_exempt(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| {
            path == prefix.as_str()
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// The exempt prefixes, in evaluation order.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exempt_prefixes_match() {
        let policy = PathPolicy::for_namespace(Namespace::Preview);
        assert!(policy.is_exempt("/admin"));
        assert!(policy.is_exempt("/admin/dashboard"));
        assert!(policy.is_exempt("/builder/pages/home"));
        assert!(policy.is_exempt("/payment/callback"));
        assert!(policy.is_exempt("/support"));
        assert!(policy.is_exempt("/onboarding/step-2"));
        assert!(policy.is_exempt("/subscription"));
    }

    #[test]
    fn test_segment_boundary() {
        let policy = PathPolicy::for_namespace(Namespace::Preview);
        assert!(!policy.is_exempt("/administrator"));
        assert!(!policy.is_exempt("/builders"));
    }

    #[test]
    fn test_other_namespace_is_exempt() {
        let preview = PathPolicy::for_namespace(Namespace::Preview);
        assert!(preview.is_exempt("/publish/acme/about"));
        assert!(!preview.is_exempt("/preview/acme/about"));

        let publish = PathPolicy::for_namespace(Namespace::Publish);
        assert!(publish.is_exempt("/preview/acme/about"));
        assert!(!publish.is_exempt("/publish/acme/about"));
    }

    #[test]
    fn test_ordinary_paths_not_exempt() {
        let policy = PathPolicy::for_namespace(Namespace::Publish);
        assert!(!policy.is_exempt("/"));
        assert!(!policy.is_exempt("/products"));
        assert!(!policy.is_exempt("/about/team"));
    }

    #[test]
    fn test_explicit_prefix_list() {
        let policy = PathPolicy::new(vec!["/internal".to_string()]);
        assert!(policy.is_exempt("/internal/tools"));
        assert!(!policy.is_exempt("/admin"));
    }
}
