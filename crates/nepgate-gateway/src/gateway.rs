//! Per-request gateway entry point
//!
//! One middleware wires the whole pipeline: exclusion list → host
//! classification → session handoff → root-domain guard → namespace
//! dispatch. Every request leaves with exactly one outcome: pass
//! through, redirect (303), or an internal rewrite the application
//! router consumes.
//!
//! Failure policy: everything recovers locally. The worst case is
//! serving the apex/unrewritten page or dropping a stale query
//! parameter, never a 5xx originating here.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{StatusCode, Uri, header, uri::PathAndQuery},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};
use url::Url;

use nepgate_core::host::is_local_host;
use nepgate_core::{GatewayConfig, Namespace, RouteAction, Topology};
use nepgate_routing::{PathPolicy, RootDomainGuard, RouteDecisionEngine, classify};
use nepgate_session::{SESSION_COOKIE, SessionSnapshot, bridge, find_cookie};

use crate::exclusion::is_excluded;

/// The gateway for one edge (preview or publish).
///
/// Holds only immutable configuration and the pure decision components;
/// cloning is cheap and every request is independent.
#[derive(Clone)]
pub struct Gateway {
    config: Arc<GatewayConfig>,
    engine: RouteDecisionEngine,
    guard: RootDomainGuard,
}

impl Gateway {
    /// Gateway with the default exemption and protection lists for
    /// `namespace`.
    pub fn new(config: Arc<GatewayConfig>, namespace: Namespace) -> Self {
        Self {
            config,
            engine: RouteDecisionEngine::with_defaults(namespace),
            guard: RootDomainGuard::default(),
        }
    }

    /// Gateway with explicit policy and guard, for tests and unusual
    /// deployments.
    pub fn with_parts(
        config: Arc<GatewayConfig>,
        namespace: Namespace,
        policy: PathPolicy,
        guard: RootDomainGuard,
    ) -> Self {
        Self {
            config,
            engine: RouteDecisionEngine::new(namespace, policy),
            guard,
        }
    }

    /// The gateway configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn handle(&self, mut req: Request, next: Next) -> Response {
        let path = req.uri().path().to_string();
        if is_excluded(&path) {
            return next.run(req).await;
        }

        let Some(host) = req
            .headers()
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
        else {
            // Nothing to classify without a host; fail safe to the apex
            // behavior and serve the path unmodified.
            warn!(path = %path, "request without Host header passed through");
            return next.run(req).await;
        };

        let (tenant, topology) = classify(&host, &self.config);
        let query = req.uri().query().map(str::to_string);

        // Token handoff runs first, on any topology: the token must be
        // scrubbed from the URL before anything else can redirect it.
        if let Some(response) = self.bridge_handoff(&host, &path, query.as_deref()) {
            return response;
        }

        // A signed-in user hitting protected apex paths belongs on
        // their own subdomain. Only requests that resolved no tenant of
        // their own are on the apex surface.
        if tenant.is_none() {
            if let Some(response) =
                self.guard_apex(&req, topology, &host, &path, query.as_deref())
            {
                return response;
            }
        }

        let action = self.engine.decide(tenant.as_ref(), &path);
        debug!(
            host = %host,
            tenant = tenant.as_ref().map(|t| t.as_str()).unwrap_or("-"),
            topology = ?topology,
            action = action.kind(),
            path = %path,
            "gateway decision"
        );

        match action {
            RouteAction::Passthrough => next.run(req).await,
            RouteAction::Redirect { target } => {
                let location = match &query {
                    Some(q) => format!("{}?{}", target, q),
                    None => target,
                };
                see_other(&location, &[])
            }
            RouteAction::Rewrite { internal_path } => {
                match rewrite_uri(req.uri(), &internal_path) {
                    Ok(uri) => {
                        *req.uri_mut() = uri;
                        next.run(req).await
                    }
                    Err(e) => {
                        warn!(path = %path, internal_path = %internal_path, error = %e, "rewrite produced invalid URI");
                        next.run(req).await
                    }
                }
            }
        }
    }

    /// Handle an `auth_token` handoff: 303 to the scrubbed URL with the
    /// session cookies attached.
    fn bridge_handoff(&self, host: &str, path: &str, query: Option<&str>) -> Option<Response> {
        let url = self.request_url(host, path, query)?;
        let handoff = bridge(&url, &self.config)?;
        let cookies: Vec<String> = handoff.cookies.iter().map(|c| c.header_value()).collect();
        debug!(host = %host, cookies = cookies.len(), "session handoff redirect");
        Some(see_other(handoff.redirect.as_str(), &cookies))
    }

    /// Redirect protected apex paths to the home tenant named by the
    /// session-snapshot cookie.
    fn guard_apex(
        &self,
        req: &Request,
        topology: Topology,
        host: &str,
        path: &str,
        query: Option<&str>,
    ) -> Option<Response> {
        let cookie_header = req.headers().get(header::COOKIE)?.to_str().ok()?;
        let raw = find_cookie(cookie_header, SESSION_COOKIE)?;
        let home_tenant = SessionSnapshot::from_cookie_value(&raw)?.home_tenant()?;

        match self
            .guard
            .guard(topology, host, path, query, Some(&home_tenant), &self.config)?
        {
            RouteAction::Redirect { target } => Some(see_other(&target, &[])),
            _ => None,
        }
    }

    /// Absolute request URL, reconstructed from the Host header.
    fn request_url(&self, host: &str, path: &str, query: Option<&str>) -> Option<Url> {
        let scheme = if is_local_host(host) || self.config.dev_mode {
            "http"
        } else {
            "https"
        };
        let mut raw = format!("{}://{}{}", scheme, host, path);
        if let Some(q) = query {
            raw.push('?');
            raw.push_str(q);
        }
        Url::parse(&raw).ok()
    }
}

/// Axum middleware entry point.
///
/// Apply *around* the application router, not via `Router::layer`:
/// rewrites must happen before route matching, so the layer wraps the
/// router and the result is served through
/// `ServiceExt::into_make_service`.
///
/// ```ignore
/// let app = middleware::from_fn_with_state(gateway, gateway_middleware)
///     .layer(application_router);
/// axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
/// ```
pub async fn gateway_middleware(
    State(gateway): State<Arc<Gateway>>,
    req: Request,
    next: Next,
) -> Response {
    gateway.handle(req, next).await
}

/// 303 See Other with optional `Set-Cookie` headers.
fn see_other(location: &str, cookies: &[String]) -> Response {
    let mut builder = Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(header::LOCATION, location);
    for cookie in cookies {
        builder = builder.header(header::SET_COOKIE, cookie);
    }
    match builder.body(Body::empty()) {
        Ok(response) => response,
        Err(e) => {
            warn!(location = %location, error = %e, "failed to build redirect response");
            StatusCode::SEE_OTHER.into_response()
        }
    }
}

/// Swap the request path for the namespaced internal path, keeping the
/// query string.
fn rewrite_uri(uri: &Uri, internal_path: &str) -> Result<Uri, http::Error> {
    let path_and_query = match uri.query() {
        Some(q) => format!("{}?{}", internal_path, q),
        None => internal_path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query.as_str())?);
    Uri::from_parts(parts).map_err(http::Error::from)
}
