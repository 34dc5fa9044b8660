//! End-to-end integration tests for NepGate
//!
//! The tests in `tests/` wire the full gateway middleware around an
//! echo application router and drive it with `tower::ServiceExt`,
//! covering the tenant-resolution scenarios, the session handoff, and
//! the root-domain guard.
