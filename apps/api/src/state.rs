use std::sync::Arc;

use crate::responder::Responder;
use crate::store::FeedbackStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FeedbackStore>,
    pub responder: Responder,
}
