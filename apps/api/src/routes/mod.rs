pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::admin::handlers as admin;
use crate::state::AppState;
use crate::submission::handlers as submission;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Customer-facing
        .route("/api/v1/feedback", post(submission::handle_submit))
        .route("/api/v1/feedback/stats", get(submission::handle_stats))
        // Admin
        .route("/api/v1/admin/metrics", get(admin::handle_metrics))
        .route("/api/v1/admin/submissions", get(admin::handle_submissions))
        .route("/api/v1/admin/export", get(admin::handle_export))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::LlmClient;
    use crate::responder::Responder;
    use crate::store::FeedbackStore;

    fn test_app(dir: &TempDir) -> Router {
        let state = AppState {
            store: Arc::new(FeedbackStore::new(dir.path().join("feedback_data.json"))),
            responder: Responder::new(Arc::new(LlmClient::new(None).unwrap())),
        };
        build_router(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = send(app, Request::get(uri).body(Body::empty()).unwrap()).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn submit_raw(app: &Router, payload: &str) -> (StatusCode, Value) {
        let request = Request::post("/api/v1/feedback")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = send(app, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn submit(app: &Router, payload: Value) -> (StatusCode, Value) {
        submit_raw(app, &payload.to_string()).await
    }

    #[tokio::test]
    async fn test_health() {
        let dir = TempDir::new().unwrap();
        let (status, body) = get_json(&test_app(&dir), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_submit_returns_fallback_reply() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let (status, body) =
            submit(&app, json!({"rating": 5, "review": "Great food and service"})).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["message"], "Thank you for your feedback!");
        assert!(body["response"].as_str().unwrap().contains("5-star"));
        assert_eq!(
            body["response_source"],
            json!({"kind": "fallback", "reason": "missing_credential"})
        );
    }

    #[tokio::test]
    async fn test_empty_review_is_rejected_and_not_stored() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let (status, body) = submit(&app, json!({"rating": 4, "review": "   \n"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Please write a review");

        let (_, stats) = get_json(&app, "/api/v1/feedback/stats").await;
        assert_eq!(stats["total"], 0);
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_rejected() {
        let dir = TempDir::new().unwrap();
        let (status, body) = submit(&test_app(&dir), json!({"rating": 6, "review": "Hi"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_submissions_get_json_validation_errors() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        for payload in [
            r#"{"rating":4.5,"review":"ok"}"#,
            r#"{"rating":99999999999999999999,"review":"ok"}"#,
            r#"{"rating":"5","review":"ok"}"#,
            r#"{"review":"ok"}"#,
            r#"{"rating":5,"review":"#,
            r#"[1,2]"#,
        ] {
            let (status, body) = submit_raw(&app, payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{payload}");
        }

        let (_, stats) = get_json(&app, "/api/v1/feedback/stats").await;
        assert_eq!(stats["total"], 0);
    }

    #[tokio::test]
    async fn test_missing_review_is_rejected_like_empty_review() {
        let dir = TempDir::new().unwrap();
        let (status, body) = submit(&test_app(&dir), json!({"rating": 5})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Please write a review");
    }

    #[tokio::test]
    async fn test_two_submissions_then_admin_views() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let (_, first) = submit(&app, json!({"rating": 5, "review": "Lovely, truly"})).await;
        let (_, second) = submit(&app, json!({"rating": 1, "review": "Cold food"})).await;
        assert_eq!(first["id"], 1);
        assert_eq!(second["id"], 2);

        // Fresh router over the same file sees both records.
        let app = test_app(&dir);
        let (_, stats) = get_json(&app, "/api/v1/feedback/stats").await;
        assert_eq!(stats["total"], 2);

        let (status, metrics) = get_json(&app, "/api/v1/admin/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(metrics["total"], 2);
        assert_eq!(metrics["average_rating"], 3.0);
        assert_eq!(metrics["positive"]["count"], 1);
        assert_eq!(metrics["negative"]["percent"], 50.0);

        let (_, listing) =
            get_json(&app, "/api/v1/admin/submissions?ratings=1,2&sort=oldest").await;
        assert_eq!(listing["total"], 1);
        assert_eq!(listing["submissions"][0]["id"], 2);
        assert!(listing["submissions"][0]["actions"]
            .as_str()
            .unwrap()
            .contains("refund"));

        let (_, listing) = get_json(&app, "/api/v1/admin/submissions?sort=highest").await;
        assert_eq!(listing["submissions"][0]["rating"], 5);

        let response = app
            .clone()
            .oneshot(Request::get("/api/v1/admin/export").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .starts_with("attachment; filename=\"feedback_"));
        let csv = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(csv.to_vec()).unwrap();
        assert_eq!(csv.lines().next().unwrap(), crate::admin::export::CSV_HEADER);
        assert!(csv.contains("\"Lovely, truly\""));
    }

    #[tokio::test]
    async fn test_bad_rating_filter_is_validation_error() {
        let dir = TempDir::new().unwrap();
        let (status, body) =
            get_json(&test_app(&dir), "/api/v1/admin/submissions?ratings=9").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_admin_metrics_on_empty_store() {
        let dir = TempDir::new().unwrap();
        let (status, metrics) = get_json(&test_app(&dir), "/api/v1/admin/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(metrics["total"], 0);
        assert!(metrics["average_rating"].is_null());
        assert_eq!(metrics["positive"]["percent"], 0.0);
    }
}
