//! Handoff-token payload decoding
//!
//! Decodes the middle segment of a JWT without verifying its signature.
//! The claims feed cookie placement and redirect computation only,
//! never an authorization decision; verification is the identity
//! provider's and backend's responsibility.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use nepgate_core::TenantSlug;

/// Token decode failures. All of these are locally recovered by the
/// bridge: the handoff redirect still happens, cookie issuance is
/// skipped.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Invalid payload encoding: {0}")]
    PayloadEncoding(#[from] base64::DecodeError),

    #[error("Invalid payload UTF-8: {0}")]
    PayloadUtf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid payload JSON: {0}")]
    PayloadJson(#[from] serde_json::Error),
}

/// Fields extracted from a decoded (not verified) token payload.
///
/// The claim names are owned by the identity service; every field
/// tolerates absence. Constructed transiently during a handoff and
/// never stored beyond the cookies derived from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionClaims {
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub store_name: Option<String>,
    pub phone: Option<String>,
    /// Custom domain attached to the tenant site, if any
    pub domain: Option<String>,
    /// Home tenant slug; drives the root-domain guard
    pub sub_domain: Option<String>,
    pub has_profile: bool,
    pub onboarding_completed: bool,
    pub website_type: Option<String>,
    /// Expiry, Unix seconds
    pub exp: Option<i64>,
}

impl SessionClaims {
    /// The user's home tenant, when the slug claim is present and valid.
    pub fn home_tenant(&self) -> Option<TenantSlug> {
        self.sub_domain
            .as_deref()
            .and_then(|s| TenantSlug::new(s).ok())
    }
}

/// Decode the payload segment of a handoff token.
///
/// The token must have the three-segment JWT shape; only the middle
/// segment is read (base64url, no padding). The signature segment is
/// deliberately ignored.
pub fn decode_claims(token: &str) -> Result<SessionClaims, SessionError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(SessionError::MalformedToken(format!(
            "expected 3 segments, got {}",
            parts.len()
        )));
    }
    if parts[1].is_empty() {
        return Err(SessionError::MalformedToken(
            "missing payload segment".to_string(),
        ));
    }

    let payload = URL_SAFE_NO_PAD.decode(parts[1])?;
    let payload = String::from_utf8(payload)?;
    let claims: SessionClaims = serde_json::from_str(&payload)?;
    Ok(claims)
}

#[cfg(test)]
pub(crate) mod test_tokens {
    use super::*;

    /// Assemble an unsigned test token from a JSON payload.
    pub fn token_with_payload(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.sig", header, body)
    }
}

#[cfg(test)]
mod tests {
    use super::test_tokens::token_with_payload;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_claims() {
        let token = token_with_payload(&json!({
            "user_id": 42,
            "email": "owner@acme.com",
            "name": "Acme Owner",
            "role": "owner",
            "store_name": "Acme Store",
            "phone": "+9779800000000",
            "domain": "acme.com",
            "sub_domain": "acme",
            "has_profile": true,
            "onboarding_completed": true,
            "website_type": "ecommerce",
            "exp": 1_900_000_000,
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id, Some(42));
        assert_eq!(claims.email.as_deref(), Some("owner@acme.com"));
        assert_eq!(claims.sub_domain.as_deref(), Some("acme"));
        assert_eq!(claims.exp, Some(1_900_000_000));
        assert!(claims.has_profile);
        assert_eq!(claims.home_tenant().unwrap().as_str(), "acme");
    }

    #[test]
    fn test_decode_tolerates_missing_fields() {
        let token = token_with_payload(&json!({ "email": "x@y.z" }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.email.as_deref(), Some("x@y.z"));
        assert!(claims.user_id.is_none());
        assert!(claims.exp.is_none());
        assert!(!claims.has_profile);
        assert!(claims.home_tenant().is_none());
    }

    #[test]
    fn test_decode_tolerates_unknown_fields() {
        let token = token_with_payload(&json!({
            "sub_domain": "acme",
            "iss": "https://id.nepdora.com",
            "aud": "nepdora-web",
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub_domain.as_deref(), Some("acme"));
    }

    #[test]
    fn test_wrong_segment_count_rejected() {
        assert!(matches!(
            decode_claims("only-one-segment"),
            Err(SessionError::MalformedToken(_))
        ));
        assert!(matches!(
            decode_claims("two.segments"),
            Err(SessionError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_empty_payload_segment_rejected() {
        assert!(matches!(
            decode_claims("header..sig"),
            Err(SessionError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_bad_base64_rejected() {
        assert!(matches!(
            decode_claims("h.!!!not-base64!!!.s"),
            Err(SessionError::PayloadEncoding(_))
        ));
    }

    #[test]
    fn test_bad_json_rejected() {
        let body = URL_SAFE_NO_PAD.encode("not json at all");
        let token = format!("h.{}.s", body);
        assert!(matches!(
            decode_claims(&token),
            Err(SessionError::PayloadJson(_))
        ));
    }

    #[test]
    fn test_invalid_home_tenant_slug_ignored() {
        let token = token_with_payload(&json!({ "sub_domain": "a.b" }));
        let claims = decode_claims(&token).unwrap();
        assert!(claims.home_tenant().is_none());
    }
}
