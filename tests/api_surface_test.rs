mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use pourtrack_api::{
    api_v1_routes,
    auth::{auth_routes, AuthService},
    config::AppConfig,
    handlers::AppServices,
    AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "x".repeat(64),
        jwt_expiration: 3600,
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        log_level: "info".to_string(),
        log_json: false,
        auto_migrate: true,
        cors_allowed_origins: None,
        cors_allow_any_origin: false,
        db_max_connections: 1,
        db_min_connections: 1,
        db_connect_timeout_secs: 30,
        db_acquire_timeout_secs: 8,
        db_idle_timeout_secs: 600,
        ai_api_key: None,
        ai_endpoint: "https://example.invalid".to_string(),
        ai_model: "test-model".to_string(),
    }
}

async fn app() -> Router {
    let db = common::test_db().await;
    let store = common::load_store(&db).await;
    let cfg = test_config();

    let auth = Arc::new(AuthService::new(
        db.clone(),
        &cfg.jwt_secret,
        cfg.jwt_expiration,
    ));
    let services = AppServices::new(db.clone(), store.clone(), &cfg);
    let state = AppState {
        db,
        config: cfg,
        store,
        services,
        auth,
    };

    Router::new()
        .nest("/api/v1", api_v1_routes())
        .nest("/auth", auth_routes())
        .with_state(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn bearer(request: Request<Body>, token: &str) -> Request<Body> {
    let (mut parts, body) = request.into_parts();
    parts.headers.insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    Request::from_parts(parts, body)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn sign_in(router: &Router) -> String {
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            json!({"email": "engenheiro@obra.com", "password": "concreto123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn status_endpoint_is_public() {
    let router = app().await;

    let response = router
        .oneshot(Request::get("/api/v1/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["service"], json!("pourtrack-api"));
}

#[tokio::test]
async fn application_views_are_gated_by_authentication() {
    let router = app().await;

    let response = router
        .oneshot(Request::get("/api/v1/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_create_and_list_through_http() {
    let router = app().await;
    let token = sign_in(&router).await;

    let created = router
        .clone()
        .oneshot(bearer(
            json_request(
                "POST",
                "/api/v1/locations",
                json!({"name": "Bloco A", "cost_center": "CC-101"}),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created_body = body_json(created).await;
    let id = created_body["id"].as_str().unwrap().to_string();

    let listed = router
        .clone()
        .oneshot(bearer(
            Request::get("/api/v1/locations").body(Body::empty()).unwrap(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    let listed_body = body_json(listed).await;
    assert_eq!(listed_body[0]["id"], json!(id));
    assert_eq!(listed_body[0]["name"], json!("Bloco A"));
}

#[tokio::test]
async fn pour_form_required_fields_surface_as_bad_requests() {
    let router = app().await;
    let token = sign_in(&router).await;

    let response = router
        .clone()
        .oneshot(bearer(
            json_request("POST", "/api/v1/pours", json!({"volume_delivered": "8.5"})),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Selecione um Local de Aplicação"));
}

#[tokio::test]
async fn empty_report_exports_answer_no_content() {
    let router = app().await;
    let token = sign_in(&router).await;

    for uri in ["/api/v1/reports/xlsx", "/api/v1/reports/pdf"] {
        let response = router
            .clone()
            .oneshot(bearer(Request::get(uri).body(Body::empty()).unwrap(), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
async fn analysis_degrades_to_placeholder_without_a_credential() {
    let router = app().await;
    let token = sign_in(&router).await;

    let response = router
        .clone()
        .oneshot(bearer(
            json_request("POST", "/api/v1/analysis", json!({})),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["report"], json!("API Key not configured."));
}
