//! Axum route handlers for the admin API.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::admin::export::{export_filename, to_csv};
use crate::admin::metrics::{compute_metrics, FeedbackMetrics};
use crate::admin::query::{parse_rating_filter, select, SortOrder};
use crate::errors::AppError;
use crate::models::FeedbackRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmissionsQuery {
    /// Comma-separated ratings, e.g. `1,2`. Absent means all.
    pub ratings: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
}

#[derive(Debug, Serialize)]
pub struct SubmissionsResponse {
    pub total: usize,
    pub submissions: Vec<FeedbackRecord>,
}

/// GET /api/v1/admin/metrics
pub async fn handle_metrics(State(state): State<AppState>) -> Result<Json<FeedbackMetrics>, AppError> {
    let records = load_records(&state).await?;
    Ok(Json(compute_metrics(&records)))
}

/// GET /api/v1/admin/submissions?ratings=1,2&sort=newest
pub async fn handle_submissions(
    State(state): State<AppState>,
    Query(params): Query<SubmissionsQuery>,
) -> Result<Json<SubmissionsResponse>, AppError> {
    let ratings = parse_rating_filter(params.ratings.as_deref()).map_err(AppError::Validation)?;
    let records = load_records(&state).await?;
    let submissions = select(&records, &ratings, params.sort);

    Ok(Json(SubmissionsResponse {
        total: submissions.len(),
        submissions,
    }))
}

/// GET /api/v1/admin/export
///
/// Downloads the full collection as CSV.
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let records = load_records(&state).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(Utc::now().date_naive())
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        to_csv(&records),
    ))
}

async fn load_records(state: &AppState) -> Result<Vec<FeedbackRecord>, AppError> {
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || store.load_or_default())
        .await
        .map_err(|e| AppError::Internal(e.into()))
}
