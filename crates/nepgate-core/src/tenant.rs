//! Tenant identity and host topology types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Opaque identifier for a tenant site, derived from the subdomain the
/// request arrived on.
///
/// The slug is never generated by the gateway; it is extracted from host
/// names and carried through routing decisions. Construction validates
/// that the value is a syntactically valid subdomain label: non-empty,
/// no dots, no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantSlug(String);

impl TenantSlug {
    /// Create a tenant slug, validating the subdomain-label invariant.
    pub fn new(slug: impl Into<String>) -> Result<Self> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(Error::InvalidTenant("empty tenant slug".to_string()));
        }
        if slug.contains('.') {
            return Err(Error::InvalidTenant(format!(
                "tenant slug '{}' must be a single subdomain label",
                slug
            )));
        }
        if slug.chars().any(|c| c.is_whitespace()) {
            return Err(Error::InvalidTenant(format!(
                "tenant slug '{}' contains whitespace",
                slug
            )));
        }
        Ok(Self(slug))
    }

    /// Get the slug as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Which deployment topology produced a tenant resolution.
///
/// Determines the extraction rule that matched the host name, and feeds
/// downstream decisions (protocol selection, cookie scoping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    /// `<label>.localhost`, local development
    Local,
    /// The root domain or its `www` alias; also the fail-safe for
    /// unrecognized hosts
    Apex,
    /// `<tenant>.<root domain>` in production
    TenantSubdomain,
    /// Build-specific preview host (`<tenant>---<build>.<suffix>`)
    EphemeralPreview,
}
