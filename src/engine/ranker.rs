use std::time::Instant;

use crate::{
    catalog::Catalog,
    engine::FeatureVector,
    error::{AppError, AppResult},
    models::{Feedback, Recommendation, UserPreference},
};

/// Direct feedback on a candidate scales its own score
const LIKED_BOOST: f64 = 1.25;
const DISLIKED_PENALTY: f64 = 0.5;

/// Neighbor feedback scales by up to ±10%, weighted by similarity
const NEIGHBOR_WEIGHT: f64 = 0.1;

/// Ranks the catalog against the user's preferences
///
/// Base score is the cosine similarity between the preference query
/// vector and each cached catalog vector. Activities over budget or
/// outside the group-size range are filtered out; pinned activities
/// bypass both the filters and the score ordering and always lead the
/// result, in catalog insertion order among themselves. Ties in the
/// scored tail also break by insertion order (stable sort).
pub fn recommend(
    catalog: &Catalog,
    preference: &UserPreference,
    limit: usize,
) -> AppResult<Vec<Recommendation>> {
    let start = Instant::now();

    let query = catalog.space().encode_preference(preference)?;

    let liked = feedback_vectors(catalog, preference, Feedback::Liked);
    let disliked = feedback_vectors(catalog, preference, Feedback::Disliked);

    let mut pinned: Vec<Recommendation> = Vec::new();
    let mut scored: Vec<Recommendation> = Vec::new();

    for (activity, vector) in catalog.entries() {
        let similarity = query.cosine(vector);

        if preference.feedback_for(&activity.id) == Some(Feedback::Pinned) {
            pinned.push(Recommendation {
                activity: activity.clone(),
                score: similarity,
                pinned: true,
            });
            continue;
        }

        if activity.cost > preference.budget_ceiling
            || !activity.fits_group(preference.group_size)
        {
            continue;
        }

        let score = similarity * bias_factor(&activity.id, vector, preference, &liked, &disliked);
        scored.push(Recommendation {
            activity: activity.clone(),
            score,
            pinned: false,
        });
    }

    if pinned.is_empty() && scored.is_empty() {
        return Err(AppError::EmptyCatalog);
    }

    // Stable sort keeps catalog insertion order for equal scores
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit.saturating_sub(pinned.len()));

    let mut results = pinned;
    results.extend(scored);

    tracing::info!(
        returned = results.len(),
        pinned = results.iter().filter(|r| r.pinned).count(),
        limit,
        elapsed_us = start.elapsed().as_micros() as u64,
        "Recommendation query completed"
    );

    Ok(results)
}

/// Multiplicative feedback bias for one candidate
///
/// The candidate's own feedback applies a flat factor; every other
/// liked or disliked activity pulls the score up or down in proportion
/// to how similar the candidate is to it.
fn bias_factor(
    candidate_id: &uuid::Uuid,
    candidate: &FeatureVector,
    preference: &UserPreference,
    liked: &[(uuid::Uuid, &FeatureVector)],
    disliked: &[(uuid::Uuid, &FeatureVector)],
) -> f64 {
    let mut factor = match preference.feedback_for(candidate_id) {
        Some(Feedback::Liked) => LIKED_BOOST,
        Some(Feedback::Disliked) => DISLIKED_PENALTY,
        _ => 1.0,
    };

    for (id, vector) in liked.iter().copied() {
        if &id != candidate_id {
            factor *= 1.0 + NEIGHBOR_WEIGHT * candidate.cosine(vector);
        }
    }
    for (id, vector) in disliked.iter().copied() {
        if &id != candidate_id {
            factor *= 1.0 - NEIGHBOR_WEIGHT * candidate.cosine(vector);
        }
    }

    factor
}

/// Cached vectors for all feedback entries in a given state
///
/// Feedback referencing IDs no longer in the catalog is skipped.
fn feedback_vectors<'a>(
    catalog: &'a Catalog,
    preference: &UserPreference,
    state: Feedback,
) -> Vec<(uuid::Uuid, &'a FeatureVector)> {
    preference
        .feedback
        .iter()
        .filter(|(_, s)| **s == state)
        .filter_map(|(id, _)| catalog.vector_for(id).map(|v| (*id, v)))
        .collect()
}
