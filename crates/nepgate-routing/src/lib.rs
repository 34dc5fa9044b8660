//! NepGate Routing
//!
//! Pure per-request decision logic for the gateway:
//! - Host classification (which tenant, which topology)
//! - Path exemption policy (internal surfaces bypass rewriting)
//! - Route decision engine (passthrough / redirect / rewrite)
//! - Root-domain guard (send signed-in users to their tenant)
//!
//! Everything in this crate is a pure function of the request; there is
//! no I/O and no shared mutable state.

pub mod engine;
pub mod host_classifier;
pub mod path_policy;
pub mod root_guard;

pub use engine::RouteDecisionEngine;
pub use host_classifier::classify;
pub use path_policy::PathPolicy;
pub use root_guard::RootDomainGuard;
