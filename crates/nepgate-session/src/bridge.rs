//! Session bridge
//!
//! Detects a handoff token in the query string, scrubs it from the URL,
//! and turns its claims into scoped cookie directives. The token is
//! decoded, never verified (see crate docs); a token that fails to
//! decode still gets scrubbed from the redirect target so it can never
//! end up in a bookmarkable URL.

use chrono::Utc;
use tracing::{debug, warn};
use url::Url;

use nepgate_core::GatewayConfig;

use crate::claims::decode_claims;
use crate::cookie::{
    ACCESS_TOKEN_COOKIE, CookieDirective, REFRESH_TOKEN_COOKIE, SESSION_COOKIE,
};
use crate::snapshot::SessionSnapshot;

/// Query parameter carrying the handoff access token.
pub const AUTH_TOKEN_PARAM: &str = "auth_token";
/// Query parameter carrying the optional refresh token.
pub const REFRESH_TOKEN_PARAM: &str = "refresh_token";

/// Fallback cookie lifetime when the token carries no expiry: 7 days.
const DEFAULT_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

/// Result of a detected handoff.
#[derive(Debug, Clone)]
pub struct Handoff {
    /// Where to send the browser: the current URL minus the token
    /// parameters.
    pub redirect: Url,
    /// Cookies to set alongside the redirect. Empty when the token
    /// payload failed to decode.
    pub cookies: Vec<CookieDirective>,
}

/// Detect and process a handoff on the current request URL.
///
/// Returns `None` when no `auth_token` parameter is present.
pub fn bridge(url: &Url, config: &GatewayConfig) -> Option<Handoff> {
    bridge_at(url, Utc::now().timestamp(), config)
}

/// [`bridge`] with an explicit clock, for deterministic tests.
pub fn bridge_at(url: &Url, now: i64, config: &GatewayConfig) -> Option<Handoff> {
    let mut access_token = None;
    let mut refresh_token = None;
    let mut remaining: Vec<(String, String)> = Vec::new();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            AUTH_TOKEN_PARAM => access_token = Some(value.into_owned()),
            REFRESH_TOKEN_PARAM => refresh_token = Some(value.into_owned()),
            _ => remaining.push((key.into_owned(), value.into_owned())),
        }
    }
    let access_token = access_token?;

    // The handoff parameters never survive into the target URL,
    // whatever happens with the token below.
    let mut redirect = url.clone();
    redirect.set_query(None);
    if !remaining.is_empty() {
        redirect.query_pairs_mut().extend_pairs(remaining);
    }

    let host = url.host_str().unwrap_or_default();
    let cookies = match decode_claims(&access_token) {
        Ok(claims) => {
            let max_age = claims
                .exp
                .map(|exp| (exp - now).max(0))
                .unwrap_or(DEFAULT_MAX_AGE_SECS);
            debug!(host = %host, max_age, "session handoff accepted");
            build_cookies(
                &access_token,
                refresh_token.as_deref(),
                &SessionSnapshot::from_claims(&claims),
                max_age,
                host,
                config,
            )
        }
        Err(e) => {
            // Non-fatal: redirect anyway, just without a session.
            warn!(host = %host, error = %e, "handoff token payload failed to decode");
            Vec::new()
        }
    };

    Some(Handoff { redirect, cookies })
}

/// One cookie set scoped to the current host and, outside development,
/// a mirrored set scoped to the apex domain so the session spans the
/// root domain and every tenant subdomain.
fn build_cookies(
    access_token: &str,
    refresh_token: Option<&str>,
    snapshot: &SessionSnapshot,
    max_age: i64,
    host: &str,
    config: &GatewayConfig,
) -> Vec<CookieDirective> {
    let dev = config.is_dev_host(host);
    let secure = !dev;
    let snapshot_value = snapshot.to_cookie_value();

    let mut cookies = vec![
        CookieDirective::host_scoped(SESSION_COOKIE, &snapshot_value, max_age, secure),
        CookieDirective::host_scoped(ACCESS_TOKEN_COOKIE, access_token, max_age, secure),
    ];
    if let Some(refresh) = refresh_token {
        cookies.push(CookieDirective::host_scoped(
            REFRESH_TOKEN_COOKIE,
            refresh,
            max_age,
            secure,
        ));
    }

    if !dev {
        let domain = config.cookie_domain();
        cookies.push(CookieDirective::domain_scoped(
            SESSION_COOKIE,
            &snapshot_value,
            &domain,
            max_age,
            secure,
        ));
        cookies.push(CookieDirective::domain_scoped(
            ACCESS_TOKEN_COOKIE,
            access_token,
            &domain,
            max_age,
            secure,
        ));
        if let Some(refresh) = refresh_token {
            cookies.push(CookieDirective::domain_scoped(
                REFRESH_TOKEN_COOKIE,
                refresh,
                &domain,
                max_age,
                secure,
            ));
        }
    }

    cookies
}
