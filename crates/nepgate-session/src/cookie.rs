//! Cookie directives
//!
//! The gateway communicates with the application layer through three
//! cookies whose names are part of the contract: the raw access and
//! refresh tokens, and the JSON session snapshot. Directives render to
//! `Set-Cookie` header values; one handoff can produce several (the
//! host-scoped set plus the apex-domain mirror).

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Raw access-token cookie.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Raw refresh-token cookie.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
/// JSON session-snapshot cookie.
pub const SESSION_COOKIE: &str = "session_user";

/// Octets that must not appear raw in a cookie value (RFC 6265), plus
/// `%` so decoding is unambiguous.
const COOKIE_VALUE_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b',')
    .add(b';')
    .add(b'\\')
    .add(b'%');

/// One `Set-Cookie` directive.
///
/// Always `Path=/` and `SameSite=Lax`; `Secure` outside development;
/// `Domain` only on the apex-wide mirror. Max-age is clamped to ≥ 0 at
/// construction so an already-expired token clears rather than lingers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDirective {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
    pub max_age: i64,
    pub secure: bool,
}

impl CookieDirective {
    /// Host-scoped directive (no `Domain` attribute).
    pub fn host_scoped(
        name: impl Into<String>,
        value: impl Into<String>,
        max_age: i64,
        secure: bool,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            max_age: max_age.max(0),
            secure,
        }
    }

    /// Apex-wide directive (`Domain=.{apex}`), shared by the root
    /// domain and every tenant subdomain.
    pub fn domain_scoped(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
        max_age: i64,
        secure: bool,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: Some(domain.into()),
            max_age: max_age.max(0),
            secure,
        }
    }

    /// Render as a `Set-Cookie` header value.
    pub fn header_value(&self) -> String {
        let mut out = format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            self.name,
            utf8_percent_encode(&self.value, COOKIE_VALUE_ENCODE),
            self.max_age
        );
        if self.secure {
            out.push_str("; Secure");
        }
        if let Some(domain) = &self.domain {
            out.push_str("; Domain=");
            out.push_str(domain);
        }
        out
    }
}

/// Find a cookie by name in a `Cookie` request header, percent-decoding
/// its value.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        if k == name {
            Some(percent_decode_str(v).decode_utf8_lossy().into_owned())
        } else {
            None
        }
    })
}
