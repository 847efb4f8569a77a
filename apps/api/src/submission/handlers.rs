//! Axum route handlers for the customer-facing feedback API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::feedback::NewFeedback;
use crate::models::Rating;
use crate::responder::DraftSource;
use crate::state::AppState;

pub const THANK_YOU_MESSAGE: &str = "Thank you for your feedback!";

/// Fields are read loosely so that every bad submission is answered with a
/// validation error rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    #[serde(default)]
    pub rating: Value,
    #[serde(default)]
    pub review: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitFeedbackResponse {
    pub id: u64,
    pub message: String,
    /// The reply shown to the customer.
    pub response: String,
    pub response_source: DraftSource,
}

#[derive(Debug, Serialize)]
pub struct FeedbackStatsResponse {
    pub total: usize,
}

/// POST /api/v1/feedback
///
/// Drafts reply, summary and actions, then appends the submission to the store.
/// Drafting never fails; only validation and storage errors reach the caller.
pub async fn handle_submit(
    State(state): State<AppState>,
    payload: Result<Json<SubmitFeedbackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitFeedbackResponse>), AppError> {
    let Json(request) = payload?;
    let rating = parse_rating(&request.rating)?;
    if request.review.trim().is_empty() {
        return Err(AppError::Validation("Please write a review".to_string()));
    }

    let drafts = state.responder.draft_all(rating, &request.review).await;
    let response_source = drafts.reply.source;

    let draft = NewFeedback {
        rating,
        review: request.review,
        ai_response: drafts.reply.text,
        summary: drafts.summary.text,
        actions: drafts.actions.text,
    };

    let store = state.store.clone();
    let record = tokio::task::spawn_blocking(move || store.append(draft))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    info!(
        "Stored feedback #{} ({}-star, reply {:?})",
        record.id, record.rating, response_source
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitFeedbackResponse {
            id: record.id,
            message: THANK_YOU_MESSAGE.to_string(),
            response: record.ai_response,
            response_source,
        }),
    ))
}

/// Accepts only JSON integers in 1..=5. Floats, strings, null and integers
/// too large for `i64` are all rejected the same way.
fn parse_rating(value: &Value) -> Result<Rating, AppError> {
    match value.as_i64() {
        Some(v) => Rating::new(v).map_err(|e| AppError::Validation(e.to_string())),
        None => Err(AppError::Validation(format!(
            "rating must be an integer between 1 and 5, got {value}"
        ))),
    }
}

/// GET /api/v1/feedback/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<FeedbackStatsResponse>, AppError> {
    let store = state.store.clone();
    let total = tokio::task::spawn_blocking(move || store.count())
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(Json(FeedbackStatsResponse { total }))
}
