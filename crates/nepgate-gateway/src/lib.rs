//! NepGate Gateway
//!
//! The per-request composition root: wires host classification, the
//! route decision engine, the session bridge, and the root-domain guard
//! into a single axum middleware. No state survives past one request;
//! the only shared data is the immutable configuration.

pub mod exclusion;
pub mod gateway;
pub mod middleware;

pub use exclusion::is_excluded;
pub use gateway::{Gateway, gateway_middleware};
pub use middleware::{RequestId, request_context_middleware};
