use super::common::{no_content_response, success_response};
use crate::{
    auth::AuthenticatedUser,
    errors::ApiError,
    handlers::AppState,
    reports::ExportFile,
    services::period::Period,
};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportQuery {
    /// Defaults to the first of the current month through today.
    fn period(&self) -> Period {
        let default = Period::month_to_date();
        Period::new(
            self.start_date.unwrap_or(default.start),
            self.end_date.unwrap_or(default.end),
        )
    }
}

/// First five matching records plus the count left out of the preview.
async fn report_preview(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let preview = state.services.reports.preview(query.period()).await;
    Ok(success_response(preview))
}

async fn export_xlsx(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let file = state.services.reports.export_xlsx(query.period()).await?;
    Ok(download_or_no_content(file))
}

async fn export_pdf(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let file = state.services.reports.export_pdf(query.period()).await?;
    Ok(download_or_no_content(file))
}

/// An empty filtered set produces no file at all.
fn download_or_no_content(file: Option<ExportFile>) -> Response {
    match file {
        Some(file) => {
            info!("Serving report download: {}", file.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, file.content_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", file.file_name),
                    ),
                ],
                file.bytes,
            )
                .into_response()
        }
        None => no_content_response(),
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/preview", get(report_preview))
        .route("/xlsx", get(export_xlsx))
        .route("/pdf", get(export_pdf))
}
