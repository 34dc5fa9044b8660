//! NepGate Core Types
//!
//! This crate provides the fundamental types shared across the gateway:
//! - Tenant identity and host topology types
//! - Routing outcome types (passthrough / redirect / rewrite)
//! - The immutable gateway configuration
//! - Core error types

pub mod config;
pub mod error;
pub mod host;
pub mod route;
pub mod tenant;

pub use config::GatewayConfig;
pub use error::{Error, Result};
pub use route::{Namespace, RouteAction};
pub use tenant::{TenantSlug, Topology};
