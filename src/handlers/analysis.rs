use super::common::success_response;
use crate::{auth::AuthenticatedUser, errors::ApiError, handlers::AppState};
use axum::{extract::State, response::IntoResponse, routing::post, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    /// Markdown narrative, or a placeholder message when the AI boundary
    /// is unavailable. Always 200: analysis failures never break the app.
    pub report: String,
}

async fn generate_analysis(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.services.analysis.analyze().await;
    Ok(success_response(AnalysisResponse { report }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(generate_analysis))
}
