use super::common::{created_response, no_content_response, success_response, validate_input};
use crate::{
    auth::AuthenticatedUser,
    entities::concrete_type::RecipeIngredient,
    errors::ApiError,
    handlers::AppState,
    services::concrete_types::{CreateConcreteType, UpdateConcreteType},
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

#[derive(Debug, Deserialize, Validate)]
pub struct CreateConcreteTypeRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub characteristic_strength: Decimal,
    /// Ordered recipe; entries without a positive quantity are dropped.
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateConcreteTypeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub characteristic_strength: Option<Decimal>,
    pub ingredients: Option<Vec<RecipeIngredient>>,
}

async fn create_concrete_type(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateConcreteTypeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let type_id = state
        .services
        .concrete_types
        .create(CreateConcreteType {
            name: payload.name,
            description: payload.description,
            characteristic_strength: payload.characteristic_strength,
            ingredients: payload.ingredients,
        })
        .await?;

    info!("Concrete type created: {}", type_id);
    Ok(created_response(serde_json::json!({ "id": type_id })))
}

async fn update_concrete_type(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(type_id): Path<Uuid>,
    Json(payload): Json<UpdateConcreteTypeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let concrete_type = state
        .services
        .concrete_types
        .update(
            type_id,
            UpdateConcreteType {
                name: payload.name,
                description: payload.description,
                characteristic_strength: payload.characteristic_strength,
                ingredients: payload.ingredients,
            },
        )
        .await?;

    Ok(success_response(concrete_type))
}

async fn delete_concrete_type(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(type_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.concrete_types.delete(type_id).await?;
    Ok(no_content_response())
}

async fn list_concrete_types(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.concrete_types.list().await))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_concrete_type))
        .route("/", get(list_concrete_types))
        .route("/:id", put(update_concrete_type))
        .route("/:id", delete(delete_concrete_type))
}
