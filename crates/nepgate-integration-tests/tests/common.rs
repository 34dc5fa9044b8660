//! Common test utilities for integration tests

use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{Response, header},
    middleware,
    response::Response as AxumResponse,
};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http_body_util::BodyExt;
use std::convert::Infallible;
use std::sync::Arc;
use tower::Layer;

use nepgate_core::{GatewayConfig, Namespace};
use nepgate_gateway::{Gateway, gateway_middleware};

/// Echo application: returns the URI it was asked for, after any
/// gateway rewrite.
async fn echo(req: Request) -> String {
    req.uri().to_string()
}

/// Full gateway service around an echo application router.
///
/// The gateway middleware wraps the router from outside, as in the
/// server binary, so URI rewrites happen before route matching.
#[allow(dead_code)]
pub fn gateway_app(
    config: GatewayConfig,
    namespace: Namespace,
) -> impl tower::Service<Request<Body>, Response = AxumResponse, Error = Infallible> + Clone {
    let gateway = Arc::new(Gateway::new(Arc::new(config), namespace));
    let router: Router = Router::new().fallback(echo);
    middleware::from_fn_with_state(gateway, gateway_middleware).layer(router)
}

/// Assemble an unsigned handoff token from a JSON payload.
#[allow(dead_code)]
pub fn token_with_payload(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.test-signature", header, body)
}

/// GET request with a Host header.
#[allow(dead_code)]
pub fn request(host: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::HOST, host)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body to a string.
#[allow(dead_code)]
pub async fn body_string(response: Response<axum::body::Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
