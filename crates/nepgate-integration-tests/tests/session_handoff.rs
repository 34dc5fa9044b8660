//! Session-handoff scenarios through the full gateway

mod common;

use axum::http::{HeaderMap, StatusCode, header};
use chrono::Utc;
use common::{gateway_app, request, token_with_payload};
use nepgate_core::{GatewayConfig, Namespace};
use serde_json::json;
use tower::ServiceExt;

fn config() -> GatewayConfig {
    GatewayConfig::default()
}

fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

fn max_age_of(cookie: &str) -> i64 {
    cookie
        .split(';')
        .find_map(|attr| attr.trim().strip_prefix("Max-Age="))
        .and_then(|v| v.parse().ok())
        .unwrap()
}

#[tokio::test]
async fn handoff_sets_cookies_and_scrubs_query() {
    let exp = Utc::now().timestamp() + 3600;
    let token = token_with_payload(&json!({
        "user_id": 1,
        "email": "owner@acme.com",
        "sub_domain": "acme",
        "exp": exp,
    }));

    let app = gateway_app(config(), Namespace::Publish);
    let response = app
        .oneshot(request(
            "nepdora.com",
            &format!("/dashboard?auth_token={}&refresh_token=r-1", token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(location, "https://nepdora.com/dashboard");
    assert!(!location.contains("auth_token"));
    assert!(!location.contains("refresh_token"));

    let cookies = set_cookies(response.headers());
    // session + access + refresh, host-scoped and apex-mirrored
    assert_eq!(cookies.len(), 6);
    assert_eq!(
        cookies
            .iter()
            .filter(|c| c.contains("Domain=.nepdora.com"))
            .count(),
        3
    );
    assert!(cookies.iter().all(|c| c.contains("SameSite=Lax")));
    assert!(cookies.iter().all(|c| c.contains("Secure")));
    assert!(cookies.iter().all(|c| c.contains("Path=/")));
    for cookie in &cookies {
        let max_age = max_age_of(cookie);
        assert!(
            (3590..=3600).contains(&max_age),
            "unexpected max-age in {}",
            cookie
        );
    }
    assert!(cookies.iter().any(|c| c.starts_with("access_token=")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=r-1")));
    assert!(cookies.iter().any(|c| c.starts_with("session_user=")));
}

#[tokio::test]
async fn handoff_keeps_unrelated_query_params() {
    let token = token_with_payload(&json!({"exp": Utc::now().timestamp() + 60}));
    let app = gateway_app(config(), Namespace::Publish);
    let response = app
        .oneshot(request(
            "acme.nepdora.com",
            &format!("/orders?auth_token={}&tab=open", token),
        ))
        .await
        .unwrap();

    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(location, "https://acme.nepdora.com/orders?tab=open");
}

#[tokio::test]
async fn malformed_token_redirects_without_cookies() {
    let app = gateway_app(config(), Namespace::Publish);
    let response = app
        .oneshot(request("nepdora.com", "/dashboard?auth_token=not-a-jwt"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(set_cookies(response.headers()).is_empty());
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(!location.contains("auth_token"));
}

#[tokio::test]
async fn local_handoff_skips_apex_mirror_and_secure() {
    let token = token_with_payload(&json!({"exp": Utc::now().timestamp() + 60}));
    let app = gateway_app(config(), Namespace::Preview);
    let response = app
        .oneshot(request(
            "acme.localhost:3000",
            &format!("/builder?auth_token={}", token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(location, "http://acme.localhost:3000/builder");

    let cookies = set_cookies(response.headers());
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| !c.contains("Domain=")));
    assert!(cookies.iter().all(|c| !c.contains("Secure")));
}

#[tokio::test]
async fn missing_exp_falls_back_to_week_long_cookies() {
    let token = token_with_payload(&json!({"sub_domain": "acme"}));
    let app = gateway_app(config(), Namespace::Publish);
    let response = app
        .oneshot(request(
            "nepdora.com",
            &format!("/dashboard?auth_token={}", token),
        ))
        .await
        .unwrap();

    let cookies = set_cookies(response.headers());
    assert!(!cookies.is_empty());
    for cookie in &cookies {
        assert_eq!(max_age_of(cookie), 7 * 24 * 60 * 60);
    }
}

#[tokio::test]
async fn expired_token_produces_zero_max_age() {
    let token = token_with_payload(&json!({"exp": Utc::now().timestamp() - 120}));
    let app = gateway_app(config(), Namespace::Publish);
    let response = app
        .oneshot(request(
            "nepdora.com",
            &format!("/dashboard?auth_token={}", token),
        ))
        .await
        .unwrap();

    let cookies = set_cookies(response.headers());
    assert!(!cookies.is_empty());
    for cookie in &cookies {
        assert_eq!(max_age_of(cookie), 0);
    }
}

#[tokio::test]
async fn handoff_wins_over_rewrite() {
    // A tenant-host request carrying a token is redirected (scrubbed),
    // not rewritten; the rewrite happens on the follow-up request.
    let token = token_with_payload(&json!({"exp": Utc::now().timestamp() + 60}));
    let app = gateway_app(config(), Namespace::Publish);
    let response = app
        .oneshot(request(
            "acme.nepdora.com",
            &format!("/products?auth_token={}", token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://acme.nepdora.com/products"
    );
}
