use super::common::{created_response, no_content_response, success_response, validate_input};
use crate::{
    auth::AuthenticatedUser,
    entities::input::Unit,
    errors::ApiError,
    handlers::AppState,
    services::inputs::{CreateInput, UpdateInput},
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// `code` is deliberately absent: it is derived server-side.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInputRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub unit: Unit,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInputRequest {
    pub name: Option<String>,
    pub unit: Option<Unit>,
    pub price: Option<Decimal>,
}

async fn create_input(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateInputRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input_id = state
        .services
        .inputs
        .create(CreateInput {
            name: payload.name,
            unit: payload.unit,
            price: payload.price,
        })
        .await?;

    info!("Input created: {}", input_id);
    Ok(created_response(serde_json::json!({ "id": input_id })))
}

async fn update_input(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(input_id): Path<Uuid>,
    Json(payload): Json<UpdateInputRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = state
        .services
        .inputs
        .update(
            input_id,
            UpdateInput {
                name: payload.name,
                unit: payload.unit,
                price: payload.price,
            },
        )
        .await?;

    Ok(success_response(input))
}

async fn delete_input(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(input_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.inputs.delete(input_id).await?;
    Ok(no_content_response())
}

async fn list_inputs(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.inputs.list().await))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_input))
        .route("/", get(list_inputs))
        .route("/:id", put(update_input))
        .route("/:id", delete(delete_input))
}
