use super::common::{created_response, no_content_response, success_response, validate_input};
use crate::{
    auth::AuthenticatedUser,
    errors::ApiError,
    handlers::AppState,
    services::locations::{CreateLocation, UpdateLocation},
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

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub cost_center: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub cost_center: Option<String>,
}

async fn create_location(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateLocationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let location_id = state
        .services
        .locations
        .create(CreateLocation {
            name: payload.name,
            cost_center: payload.cost_center,
        })
        .await?;

    info!("Location created: {}", location_id);
    Ok(created_response(serde_json::json!({ "id": location_id })))
}

async fn update_location(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(location_id): Path<Uuid>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let location = state
        .services
        .locations
        .update(
            location_id,
            UpdateLocation {
                name: payload.name,
                cost_center: payload.cost_center,
            },
        )
        .await?;

    Ok(success_response(location))
}

async fn delete_location(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(location_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.locations.delete(location_id).await?;
    Ok(no_content_response())
}

async fn list_locations(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.locations.list().await))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_location))
        .route("/", get(list_locations))
        .route("/:id", put(update_location))
        .route("/:id", delete(delete_location))
}
