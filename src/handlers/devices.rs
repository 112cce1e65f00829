use super::common::{created_response, no_content_response, success_response, validate_input};
use crate::{
    auth::AuthenticatedUser,
    errors::ApiError,
    handlers::AppState,
    services::devices::{CreateDevice, UpdateDevice},
};
use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeviceRequest {
    #[validate(length(min = 1))]
    pub device_type: String,
    #[validate(length(min = 1))]
    pub ua: String,
    pub location_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDeviceRequest {
    pub device_type: Option<String>,
    pub ua: Option<String>,
    pub location_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct DeviceListQuery {
    /// Narrows the listing to the device choice set of one location.
    pub location_id: Option<Uuid>,
}

async fn create_device(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateDeviceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let device_id = state
        .services
        .devices
        .create(CreateDevice {
            device_type: payload.device_type,
            ua: payload.ua,
            location_id: payload.location_id,
        })
        .await?;

    info!("Device created: {}", device_id);
    Ok(created_response(serde_json::json!({ "id": device_id })))
}

async fn update_device(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(device_id): Path<Uuid>,
    Json(payload): Json<UpdateDeviceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let device = state
        .services
        .devices
        .update(
            device_id,
            UpdateDevice {
                device_type: payload.device_type,
                ua: payload.ua,
                location_id: payload.location_id,
            },
        )
        .await?;

    Ok(success_response(device))
}

async fn delete_device(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(device_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.devices.delete(device_id).await?;
    Ok(no_content_response())
}

async fn list_devices(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<DeviceListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let devices = match query.location_id {
        Some(location_id) => state.services.devices.list_for_location(location_id).await,
        None => state.services.devices.list().await,
    };
    Ok(success_response(devices))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_device))
        .route("/", get(list_devices))
        .route("/:id", put(update_device))
        .route("/:id", delete(delete_device))
}
