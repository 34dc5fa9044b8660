//! Gateway configuration
//!
//! Process-wide, read-only settings established at startup and shared
//! by reference into every request. Nothing here is mutated after
//! construction; tests inject alternate configs freely.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Immutable gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Root (apex) domain the platform is served from,
    /// e.g. `nepdora.com`. Tenants live on subdomains of it.
    pub root_domain: String,

    /// Domain suffix of ephemeral preview deployments
    /// (`<tenant>---<build>.<suffix>`). Falls back to the root domain
    /// when unset, so self-hosted preview builds resolve without extra
    /// configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_suffix: Option<String>,

    /// Development mode: cookies lose the `Secure` flag and redirects
    /// stay on `http`.
    pub dev_mode: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            root_domain: default_root_domain(),
            preview_suffix: None,
            dev_mode: false,
        }
    }
}

impl GatewayConfig {
    /// Effective preview-deployment suffix.
    pub fn preview_suffix(&self) -> &str {
        self.preview_suffix.as_deref().unwrap_or(&self.root_domain)
    }

    /// Cookie `Domain` attribute that makes a cookie subdomain-wide.
    pub fn cookie_domain(&self) -> String {
        format!(".{}", self.root_domain)
    }

    /// Whether cookies for `host` must skip the `Secure` flag and the
    /// apex-domain mirror (local development has no shared apex).
    pub fn is_dev_host(&self, host: &str) -> bool {
        self.dev_mode || crate::host::is_local_host(host)
    }

    /// Validate the configuration at startup.
    pub fn validate(&self) -> Result<()> {
        if self.root_domain.is_empty() {
            return Err(Error::ConfigValidation(
                "root_domain must not be empty".to_string(),
            ));
        }
        if self.root_domain.contains("://") || self.root_domain.contains('/') {
            return Err(Error::ConfigValidation(format!(
                "root_domain '{}' must be a bare host name",
                self.root_domain
            )));
        }
        Ok(())
    }
}

fn default_root_domain() -> String {
    "nepdora.com".to_string()
}
