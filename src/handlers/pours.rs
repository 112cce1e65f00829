use super::common::{created_response, no_content_response, success_response};
use crate::{
    auth::AuthenticatedUser,
    entities::pour::Weather,
    errors::ApiError,
    handlers::AppState,
    services::pours::{parse_volume, CreatePour, PourSortKey, SortDirection, UpdatePour},
};
use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::info;
use uuid::Uuid;

// The entry form's blocking-alert texts, returned verbatim as 400 messages.
const MSG_LOCATION_REQUIRED: &str = "Selecione um Local de Aplicação";
const MSG_SUPPLIER_REQUIRED: &str = "Selecione um Fornecedor";
const MSG_TYPE_REQUIRED: &str = "Selecione um Traço de Concreto";
const MSG_VOLUME_REQUIRED: &str = "Volume da Nota Fiscal é obrigatório";

/// Distinguishes "field absent" (leave unchanged) from "field null" (clear).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct CreatePourRequest {
    /// Defaults to the local calendar day when absent.
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub invoice_number: String,
    pub location_id: Option<Uuid>,
    pub device_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub concrete_type_id: Option<Uuid>,
    /// Decimal text, parsed once at this boundary.
    pub volume_delivered: Option<String>,
    pub truck_id: Option<String>,
    pub notes: Option<String>,
    pub weather: Option<Weather>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePourRequest {
    pub date: Option<NaiveDate>,
    pub invoice_number: Option<String>,
    pub location_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    pub device_id: Option<Option<Uuid>>,
    pub supplier_id: Option<Uuid>,
    pub concrete_type_id: Option<Uuid>,
    pub volume_delivered: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub truck_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub weather: Option<Option<Weather>>,
}

#[derive(Debug, Deserialize)]
pub struct PourListQuery {
    pub sort_by: Option<PourSortKey>,
    pub sort_order: Option<SortDirection>,
}

async fn create_pour(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreatePourRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let location_id = payload
        .location_id
        .ok_or_else(|| ApiError::ValidationError(MSG_LOCATION_REQUIRED.into()))?;
    let supplier_id = payload
        .supplier_id
        .ok_or_else(|| ApiError::ValidationError(MSG_SUPPLIER_REQUIRED.into()))?;
    let concrete_type_id = payload
        .concrete_type_id
        .ok_or_else(|| ApiError::ValidationError(MSG_TYPE_REQUIRED.into()))?;
    let volume_text = payload
        .volume_delivered
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::ValidationError(MSG_VOLUME_REQUIRED.into()))?;
    let volume_delivered = parse_volume(&volume_text)?;

    let pour_id = state
        .services
        .pours
        .create(CreatePour {
            date: payload.date,
            invoice_number: payload.invoice_number,
            location_id,
            device_id: payload.device_id,
            supplier_id,
            concrete_type_id,
            volume_delivered,
            truck_id: payload.truck_id,
            notes: payload.notes,
            weather: payload.weather,
        })
        .await?;

    info!("Pour recorded: {}", pour_id);
    Ok(created_response(serde_json::json!({ "id": pour_id })))
}

async fn update_pour(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(pour_id): Path<Uuid>,
    Json(payload): Json<UpdatePourRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let volume_delivered = match payload.volume_delivered.as_deref() {
        Some(text) => Some(parse_volume(text)?),
        None => None,
    };

    let pour = state
        .services
        .pours
        .update(
            pour_id,
            UpdatePour {
                date: payload.date,
                invoice_number: payload.invoice_number,
                location_id: payload.location_id,
                device_id: payload.device_id,
                supplier_id: payload.supplier_id,
                concrete_type_id: payload.concrete_type_id,
                volume_delivered,
                truck_id: payload.truck_id,
                notes: payload.notes,
                weather: payload.weather,
            },
        )
        .await?;

    Ok(success_response(pour))
}

async fn delete_pour(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(pour_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.pours.delete(pour_id).await?;
    Ok(no_content_response())
}

/// Full history. Without explicit sort parameters the newest pours come
/// first; naming a column sorts ascending unless an order is given.
async fn list_pours(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<PourListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (key, direction) = match (query.sort_by, query.sort_order) {
        (None, None) => (PourSortKey::Date, SortDirection::Desc),
        (key, order) => (
            key.unwrap_or(PourSortKey::Date),
            order.unwrap_or(SortDirection::Asc),
        ),
    };

    let pours = state.services.pours.list_sorted(key, direction).await;
    Ok(success_response(pours))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_pour))
        .route("/", get(list_pours))
        .route("/:id", put(update_pour))
        .route("/:id", delete(delete_pour))
}
