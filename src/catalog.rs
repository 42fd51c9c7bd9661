use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    engine::{FeatureSpace, FeatureVector},
    error::{AppError, AppResult},
    models::{Activity, ActivitySpec},
};

/// The immutable activity catalog with cached feature vectors
///
/// Loaded once at startup. Activities keep their insertion order, which
/// the ranker uses for stable tie-breaking, and each activity has
/// exactly one cached vector in the shared feature space.
#[derive(Debug)]
pub struct Catalog {
    activities: Vec<Activity>,
    vectors: Vec<FeatureVector>,
    space: FeatureSpace,
    index: HashMap<Uuid, usize>,
    pub loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Builds a catalog from parsed file entries
    ///
    /// Fails on an empty entry list; every entry is encoded eagerly so a
    /// bad catalog is rejected at startup rather than at query time.
    pub fn from_specs(specs: Vec<ActivitySpec>) -> AppResult<Self> {
        if specs.is_empty() {
            return Err(AppError::Catalog("catalog has no activities".to_string()));
        }

        let activities: Vec<Activity> = specs.into_iter().map(Activity::from_spec).collect();
        let space = FeatureSpace::from_activities(&activities);

        let vectors = activities
            .iter()
            .map(|a| space.encode_activity(a))
            .collect::<AppResult<Vec<_>>>()?;

        let index = activities
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id, i))
            .collect();

        tracing::info!(
            activities = activities.len(),
            kinds = space.kinds().len(),
            dimension = space.dimension(),
            "Catalog loaded"
        );

        Ok(Self {
            activities,
            vectors,
            space,
            index,
            loaded_at: Utc::now(),
        })
    }

    /// Loads the catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let specs: Vec<ActivitySpec> = serde_json::from_str(&raw)?;
        Self::from_specs(specs)
    }

    /// Built-in fallback catalog used when no catalog file is available
    pub fn builtin() -> Self {
        let specs = vec![
            spec("Hiking", "outdoor", 0.0, 1, 6, "Enjoy nature on a scenic trail"),
            spec("Movie Night", "indoor", 15.0, 2, 8, "Watch the latest blockbuster at home"),
            spec("Cooking Class", "indoor", 40.0, 2, 6, "Learn to make pasta from scratch"),
            spec("Museum Visit", "cultural", 25.0, 1, 4, "Explore ancient artifacts and history"),
        ];
        // The builtin entries always encode cleanly
        Self::from_specs(specs).expect("builtin catalog must be valid")
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn space(&self) -> &FeatureSpace {
        &self.space
    }

    /// Looks up an activity by ID
    pub fn get(&self, id: &Uuid) -> Option<&Activity> {
        self.index.get(id).map(|&i| &self.activities[i])
    }

    /// Cached feature vector for an activity by ID
    pub fn vector_for(&self, id: &Uuid) -> Option<&FeatureVector> {
        self.index.get(id).map(|&i| &self.vectors[i])
    }

    /// Iterates activities with their cached vectors in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&Activity, &FeatureVector)> {
        self.activities.iter().zip(self.vectors.iter())
    }
}

fn spec(name: &str, kind: &str, cost: f64, lo: u32, hi: u32, description: &str) -> ActivitySpec {
    ActivitySpec {
        name: name.to_string(),
        kind: kind.to_string(),
        cost,
        group_min: lo,
        group_max: hi,
        description: Some(description.to_string()),
    }
}
