//! NepGate Server
//!
//! Standalone gateway server for the Nepdora platform edge:
//! - Classifies inbound hosts (local, apex, tenant subdomain, ephemeral
//!   preview) and resolves the tenant
//! - Rewrites tenant traffic into the preview or publish namespace
//! - Bridges the auth handoff (query token → scoped cookies)
//! - Redirects signed-in apex visitors to their tenant subdomain
//!
//! In production deployments the application layer mounts
//! `nepgate_gateway::gateway_middleware` directly; this binary runs the
//! same middleware in front of a routing-echo fallback, which is what
//! local development and edge smoke tests talk to.
//!
//! Usage:
//! ```bash
//! # With config file
//! nepgate-server --config config.yaml
//!
//! # Or with environment variables
//! NEPGATE_ROOT_DOMAIN=nepdora.com nepgate-server --edge publish
//!
//! # Local development (http cookies, no apex mirroring)
//! nepgate-server --edge preview --dev --port 3000
//! ```

mod config;
mod health;

use clap::Parser;
use config::ServerConfig;
use nepgate_core::Namespace;
use nepgate_gateway::{Gateway, gateway_middleware, request_context_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use axum::{Json, Router, ServiceExt, extract::Request, middleware, response::IntoResponse};
use tower::Layer;

const GATE: &str = r#"
  _  _          ___      _
 | \| |___ _ __/ __|__ _| |_ ___
 | .`/ -_) '_ \ (_ / _` |  _/ -_)
 |_|\_|___| .__/\___\__,_|\__\___|
          |_|    tenant edge gateway
"#;

/// NepGate - Nepdora tenant routing gateway
#[derive(Parser)]
#[command(name = "nepgate-server")]
#[command(about = "Tenant-resolution and request-routing gateway", long_about = None)]
#[command(before_help = GATE)]
struct Cli {
    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "NEPGATE_CONFIG")]
    config: Option<String>,

    /// Edge to serve (preview or publish)
    #[arg(short, long, value_name = "EDGE")]
    edge: Option<String>,

    /// Bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// Development mode: plain-http cookies, no apex mirroring
    #[arg(long)]
    dev: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    config.merge_env();

    // CLI flags override file and environment
    if let Some(edge) = &cli.edge {
        config.edge = parse_edge(edge)?;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.dev {
        config.gateway.dev_mode = true;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    config.validate()?;

    info!("NepGate {} starting", env!("CARGO_PKG_VERSION"));
    info!("Edge: {} namespace", config.edge);
    info!("Root domain: {}", config.gateway.root_domain);
    info!("Preview suffix: {}", config.gateway.preview_suffix());
    if config.gateway.dev_mode {
        info!("Development mode: cookies without Secure, no apex mirror");
    }

    let gateway = Arc::new(Gateway::new(
        Arc::new(config.gateway.clone()),
        config.edge,
    ));

    // The gateway middleware wraps the router from outside so URI
    // rewrites take effect before route matching.
    let mut router = health_router_with_echo();
    if config.logging.log_requests {
        router = router.layer(TraceLayer::new_for_http());
    }
    let app = middleware::from_fn(request_context_middleware).layer(
        middleware::from_fn_with_state(gateway, gateway_middleware).layer(router),
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("");
    info!("✅ NepGate listening on http://{}", addr);
    info!("   - Health check:    http://{}/healthz", addr);
    info!("   - Readiness check: http://{}/readyz", addr);
    info!("");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Health endpoints plus the routing-echo fallback standing in for the
/// application router.
fn health_router_with_echo() -> Router {
    health::health_router().fallback(route_echo)
}

/// Report the URI the application layer would receive, after any
/// gateway rewrite. Local development and smoke tests read this to see
/// routing decisions; production mounts the real application here.
async fn route_echo(req: Request) -> impl IntoResponse {
    Json(serde_json::json!({
        "routed_uri": req.uri().to_string(),
    }))
}

fn parse_edge(value: &str) -> Result<Namespace, String> {
    match value.to_lowercase().as_str() {
        "preview" => Ok(Namespace::Preview),
        "publish" => Ok(Namespace::Publish),
        other => Err(format!(
            "invalid edge '{}': expected 'preview' or 'publish'",
            other
        )),
    }
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edge() {
        assert_eq!(parse_edge("preview").unwrap(), Namespace::Preview);
        assert_eq!(parse_edge("PUBLISH").unwrap(), Namespace::Publish);
        assert!(parse_edge("live").is_err());
    }
}
