//! NepGate Session Bridge
//!
//! Carries an authenticated session across the apex→subdomain domain
//! hop:
//! - Decodes handoff-token payloads (base64url JWT segment, *unverified*)
//! - Derives the compact session snapshot stored in a cookie
//! - Emits scoped `Set-Cookie` directives (current host + apex mirror)
//!
//! Nothing here is an authentication decision: claims are trusted
//! exactly once, for cookie placement and redirect computation only.
//! Signature verification belongs to the identity provider and the
//! backend API.

pub mod bridge;
pub mod claims;
pub mod cookie;
pub mod snapshot;

pub use bridge::{AUTH_TOKEN_PARAM, Handoff, REFRESH_TOKEN_PARAM, bridge, bridge_at};
pub use claims::{SessionClaims, SessionError, decode_claims};
pub use cookie::{
    ACCESS_TOKEN_COOKIE, CookieDirective, REFRESH_TOKEN_COOKIE, SESSION_COOKIE, find_cookie,
};
pub use snapshot::SessionSnapshot;
