//! pourtrack API library
//!
//! Backend for tracking ready-mix concrete pours on a construction site:
//! reference registries, pour records, dashboard aggregates and report
//! exports.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod reports;
pub mod services;
pub mod store;

use axum::{extract::FromRef, extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared application state, created once at startup and cloned into every
/// handler. The registry snapshot it carries lives for the whole process.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub store: Arc<store::RegistryStore>,
    pub services: handlers::AppServices,
    pub auth: Arc<auth::AuthService>,
}

impl FromRef<AppState> for Arc<auth::AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

// Common response wrapper for the status/health endpoints.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

/// Full v1 API: the five reference registries, pour records, and the
/// read-side dashboard/report/analysis views.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .nest("/locations", handlers::locations::routes())
        .nest("/suppliers", handlers::suppliers::routes())
        .nest("/concrete-types", handlers::concrete_types::routes())
        .nest("/devices", handlers::devices::routes())
        .nest("/inputs", handlers::inputs::routes())
        .nest("/pours", handlers::pours::routes())
        .nest("/dashboard", handlers::dashboard::routes())
        .nest("/reports", handlers::reports::routes())
        .nest("/analysis", handlers::analysis::routes())
}

async fn api_status() -> Json<ApiResponse<Value>> {
    let status_data = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "pourtrack-api",
        "timestamp": Utc::now().to_rfc3339(),
    });

    Json(ApiResponse::success(status_data))
}

async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<Value>> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let health_data = json!({
        "status": db_status,
        "checks": { "database": db_status },
        "timestamp": Utc::now().to_rfc3339(),
    });

    Json(ApiResponse::success(health_data))
}
