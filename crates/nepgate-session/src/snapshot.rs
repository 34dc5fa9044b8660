//! Session snapshot cookie payload
//!
//! A compact, non-authoritative copy of user/tenant fields kept in a
//! cookie for display and routing convenience. The application layer
//! reads it to render account chrome; the gateway reads it back on apex
//! requests to find the user's home tenant.

use serde::{Deserialize, Serialize};

use nepgate_core::TenantSlug;

use crate::claims::SessionClaims;

/// The JSON body of the session cookie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub store_name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub domain: Option<String>,
    pub sub_domain: Option<String>,
    pub has_profile: bool,
    pub onboarding_completed: bool,
    pub website_type: Option<String>,
}

impl SessionSnapshot {
    /// Project the snapshot fields out of decoded claims.
    pub fn from_claims(claims: &SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email.clone(),
            store_name: claims.store_name.clone(),
            role: claims.role.clone(),
            phone: claims.phone.clone(),
            domain: claims.domain.clone(),
            sub_domain: claims.sub_domain.clone(),
            has_profile: claims.has_profile,
            onboarding_completed: claims.onboarding_completed,
            website_type: claims.website_type.clone(),
        }
    }

    /// Serialize to the cookie value (compact JSON).
    pub fn to_cookie_value(&self) -> String {
        // A struct of options and bools cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a snapshot from a cookie value. Malformed cookies yield
    /// `None`; the caller treats that like an absent session.
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        serde_json::from_str(value).ok()
    }

    /// The home tenant named by the snapshot, when present and valid.
    pub fn home_tenant(&self) -> Option<TenantSlug> {
        self.sub_domain
            .as_deref()
            .and_then(|s| TenantSlug::new(s).ok())
    }
}
