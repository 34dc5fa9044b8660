use nepgate_core::{GatewayConfig, Namespace};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Which edge this process serves: the builder/editing edge
    /// (`preview`) or the published-site edge (`publish`).
    #[serde(default = "default_edge")]
    pub edge: Namespace,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_false")]
    pub log_requests: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            edge: default_edge(),
            gateway: GatewayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_requests: false,
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("NEPGATE_EDGE") {
            match val.to_lowercase().as_str() {
                "preview" => self.edge = Namespace::Preview,
                "publish" => self.edge = Namespace::Publish,
                _ => eprintln!("Warning: Invalid NEPGATE_EDGE '{}', using default", val),
            }
        }

        if let Ok(val) = std::env::var("NEPGATE_ROOT_DOMAIN") {
            self.gateway.root_domain = val;
        }

        if let Ok(val) = std::env::var("NEPGATE_PREVIEW_SUFFIX") {
            self.gateway.preview_suffix = Some(val);
        }

        if let Ok(val) = std::env::var("NEPGATE_DEV_MODE") {
            if let Ok(enabled) = val.parse::<bool>() {
                self.gateway.dev_mode = enabled;
            }
        }

        // Logging settings
        if let Ok(val) = std::env::var("NEPGATE_LOG_REQUESTS") {
            if let Ok(enabled) = val.parse::<bool>() {
                self.logging.log_requests = enabled;
            }
        }

        if let Ok(val) = std::env::var("NEPGATE_LOG_LEVEL") {
            self.logging.level = val;
        }

        // Server settings
        if let Ok(val) = std::env::var("NEPGATE_PORT") {
            if let Ok(port) = val.parse::<u16>() {
                self.port = port;
            }
        }

        if let Ok(val) = std::env::var("NEPGATE_HOST") {
            self.host = val;
        }
    }

    /// Validate the assembled configuration at startup.
    pub fn validate(&self) -> nepgate_core::Result<()> {
        self.gateway.validate()
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_edge() -> Namespace {
    Namespace::Publish
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_false() -> bool {
    false
}
