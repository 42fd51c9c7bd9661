use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    engine,
    error::{AppError, AppResult},
    models::{Activity, Recommendation, UserPreference},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub activities: usize,
    pub catalog_loaded_at: DateTime<Utc>,
}

/// Replaces the constraint portion of the session preference
#[derive(Debug, Deserialize)]
pub struct PreferenceUpdate {
    #[serde(default)]
    pub preferred_kinds: Vec<String>,
    pub budget_ceiling: f64,
    pub group_size: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackState {
    Like,
    Dislike,
    Pin,
    Neutral,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub activity_id: Uuid,
    pub state: FeedbackState,
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub limit: Option<usize>,
}

// Handlers

/// Liveness plus catalog summary
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        activities: state.catalog.len(),
        catalog_loaded_at: state.catalog.loaded_at,
    })
}

/// Returns the full activity catalog
pub async fn get_activities(State(state): State<AppState>) -> Json<Vec<Activity>> {
    Json(state.catalog.activities().to_vec())
}

/// Returns the current session preference, feedback included
pub async fn get_preferences(State(state): State<AppState>) -> Json<UserPreference> {
    let preference = state.preference.read().await;
    Json(preference.clone())
}

/// Replaces the session's filtering constraints, keeping feedback
pub async fn put_preferences(
    State(state): State<AppState>,
    Json(update): Json<PreferenceUpdate>,
) -> AppResult<StatusCode> {
    if update.group_size == 0 {
        return Err(AppError::InvalidInput(
            "group_size must be at least 1".to_string(),
        ));
    }
    if update.budget_ceiling < 0.0 {
        return Err(AppError::InvalidInput(
            "budget_ceiling must not be negative".to_string(),
        ));
    }

    let mut preference = state.preference.write().await;
    preference.preferred_kinds = update
        .preferred_kinds
        .iter()
        .map(|k| k.to_lowercase())
        .collect();
    preference.budget_ceiling = update.budget_ceiling;
    preference.group_size = update.group_size;

    tracing::info!(
        kinds = ?preference.preferred_kinds,
        budget = preference.budget_ceiling,
        group_size = preference.group_size,
        "Preferences updated"
    );

    Ok(StatusCode::OK)
}

/// Records like/dislike/pin feedback for one activity
pub async fn post_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> AppResult<StatusCode> {
    if state.catalog.get(&request.activity_id).is_none() {
        return Err(AppError::NotFound(format!(
            "activity {} is not in the catalog",
            request.activity_id
        )));
    }

    let mut preference = state.preference.write().await;
    match request.state {
        FeedbackState::Like => preference.like(request.activity_id),
        FeedbackState::Dislike => preference.dislike(request.activity_id),
        FeedbackState::Pin => preference.pin(request.activity_id),
        FeedbackState::Neutral => preference.clear(request.activity_id),
    }

    tracing::info!(
        activity_id = %request.activity_id,
        state = ?request.state,
        "Feedback recorded"
    );

    Ok(StatusCode::OK)
}

/// Ranks the catalog against the current session state
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let limit = query.limit.unwrap_or(state.default_limit);
    if limit == 0 {
        return Err(AppError::InvalidInput("limit must be at least 1".to_string()));
    }

    let preference = state.preference.read().await;
    let recommendations = engine::recommend(&state.catalog, &preference, limit)?;
    Ok(Json(recommendations))
}
