use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{attach_request_id, request_span};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog
        .route("/activities", get(handlers::get_activities))
        // User preferences
        .route("/preferences", get(handlers::get_preferences))
        .route("/preferences", put(handlers::put_preferences))
        // Feedback
        .route("/feedback", post(handlers::post_feedback))
        // Recommendations
        .route("/recommendations", get(handlers::get_recommendations))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        // The request-ID middleware sits outside the trace layer so the
        // span can read the extension it inserts
        .layer(middleware::from_fn(attach_request_id))
}
