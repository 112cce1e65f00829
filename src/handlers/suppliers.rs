use super::common::{created_response, no_content_response, success_response, validate_input};
use crate::{
    auth::AuthenticatedUser,
    errors::ApiError,
    handlers::AppState,
    services::suppliers::{CreateSupplier, UpdateSupplier},
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

fn default_rating() -> i16 {
    5
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSupplierRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default = "default_rating")]
    pub rating: i16,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSupplierRequest {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub rating: Option<i16>,
}

async fn create_supplier(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateSupplierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let supplier_id = state
        .services
        .suppliers
        .create(CreateSupplier {
            name: payload.name,
            contact: payload.contact,
            rating: payload.rating,
        })
        .await?;

    info!("Supplier created: {}", supplier_id);
    Ok(created_response(serde_json::json!({ "id": supplier_id })))
}

async fn update_supplier(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(supplier_id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier = state
        .services
        .suppliers
        .update(
            supplier_id,
            UpdateSupplier {
                name: payload.name,
                contact: payload.contact,
                rating: payload.rating,
            },
        )
        .await?;

    Ok(success_response(supplier))
}

async fn delete_supplier(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(supplier_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.suppliers.delete(supplier_id).await?;
    Ok(no_content_response())
}

async fn list_suppliers(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.suppliers.list().await))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_supplier))
        .route("/", get(list_suppliers))
        .route("/:id", put(update_supplier))
        .route("/:id", delete(delete_supplier))
}
