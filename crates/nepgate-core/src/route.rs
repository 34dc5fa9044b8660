//! Routing outcome types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal route namespace a tenant request is dispatched into.
///
/// `Preview` is the builder/editing edge, `Publish` the live-site edge.
/// Each namespace gets its own decision-engine instantiation; the two
/// must never rewrite into each other's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Preview,
    Publish,
}

impl Namespace {
    /// The path-prefix literal for this namespace
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Preview => "preview",
            Namespace::Publish => "publish",
        }
    }

    /// The opposite namespace (its prefix is exempt from rewriting)
    pub fn other(&self) -> Namespace {
        match self {
            Namespace::Preview => Namespace::Publish,
            Namespace::Publish => Namespace::Preview,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single routing outcome produced for a request.
///
/// Exactly one action is produced per request; the engine is a pure
/// function of (topology, tenant, path, policy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Serve the request unmodified
    Passthrough,
    /// Redirect (303 See Other) to the canonical target
    Redirect { target: String },
    /// Internally rewrite to a namespaced path; downstream routing
    /// consumes the prefix to select rendering context and tenant
    Rewrite { internal_path: String },
}

impl RouteAction {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            RouteAction::Passthrough => "passthrough",
            RouteAction::Redirect { .. } => "redirect",
            RouteAction::Rewrite { .. } => "rewrite",
        }
    }
}
