use super::common::success_response;
use crate::{
    auth::AuthenticatedUser, errors::ApiError, handlers::AppState, services::period::Period,
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Aggregate stats over an inclusive date range; defaults to the current
/// calendar month.
async fn dashboard_stats(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let default = Period::current_month();
    let period = Period::new(
        query.start_date.unwrap_or(default.start),
        query.end_date.unwrap_or(default.end),
    );

    let stats = state.services.dashboard.stats(period).await;
    Ok(success_response(stats))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard_stats))
}
