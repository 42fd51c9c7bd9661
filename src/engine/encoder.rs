use crate::{
    error::{AppError, AppResult},
    models::{Activity, UserPreference},
};

/// Fixed-length numeric encoding of an activity or a preference query
///
/// Layout: one-hot kind block, then normalized cost, then normalized
/// group size. All components are non-negative, so cosine similarity
/// between two vectors falls in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn dot(&self, other: &FeatureVector) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Cosine similarity, defined as 0 when either vector has zero norm
    pub fn cosine(&self, other: &FeatureVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            0.0
        } else {
            self.dot(other) / denom
        }
    }
}

/// Encoding context derived from the catalog at load time
///
/// Holds the one-hot kind vocabulary and the catalog-wide min/max bounds
/// used for normalizing the numeric fields. Both activities and
/// preference queries are encoded against the same space, so every
/// vector shares the same dimensionality.
#[derive(Debug, Clone)]
pub struct FeatureSpace {
    /// Sorted, deduplicated activity kinds from the catalog
    kinds: Vec<String>,
    cost_bounds: (f64, f64),
    group_bounds: (f64, f64),
}

impl FeatureSpace {
    /// Builds the encoding space from the loaded catalog
    pub fn from_activities(activities: &[Activity]) -> Self {
        let mut kinds: Vec<String> = activities.iter().map(|a| a.kind.clone()).collect();
        kinds.sort();
        kinds.dedup();

        let cost_bounds = bounds(activities.iter().map(|a| a.cost));
        let group_bounds = bounds(activities.iter().map(|a| a.group_midpoint()));

        Self {
            kinds,
            cost_bounds,
            group_bounds,
        }
    }

    /// Total vector dimensionality: one slot per kind plus cost and group
    pub fn dimension(&self) -> usize {
        self.kinds.len() + 2
    }

    /// Known activity kinds, in one-hot slot order
    pub fn kinds(&self) -> &[String] {
        &self.kinds
    }

    /// Encodes a catalog activity; fails on a kind outside the vocabulary
    pub fn encode_activity(&self, activity: &Activity) -> AppResult<FeatureVector> {
        let mut values = vec![0.0; self.dimension()];
        values[self.kind_slot(&activity.kind)?] = 1.0;
        values[self.kinds.len()] = normalize(activity.cost, self.cost_bounds);
        values[self.kinds.len() + 1] = normalize(activity.group_midpoint(), self.group_bounds);
        Ok(FeatureVector(values))
    }

    /// Builds the query vector for a preference in the same space
    ///
    /// Every preferred kind sets its one-hot slot; no preferred kinds
    /// leaves the kind block at zero (kind-neutral query). The budget
    /// ceiling and desired group size fill the numeric slots, clamped
    /// to the catalog bounds before normalizing.
    pub fn encode_preference(&self, preference: &UserPreference) -> AppResult<FeatureVector> {
        let mut values = vec![0.0; self.dimension()];
        for kind in &preference.preferred_kinds {
            values[self.kind_slot(&kind.to_lowercase())?] = 1.0;
        }
        values[self.kinds.len()] = normalize(preference.budget_ceiling, self.cost_bounds);
        values[self.kinds.len() + 1] =
            normalize(preference.group_size as f64, self.group_bounds);
        Ok(FeatureVector(values))
    }

    fn kind_slot(&self, kind: &str) -> AppResult<usize> {
        self.kinds
            .iter()
            .position(|k| k == kind)
            .ok_or_else(|| AppError::UnknownKind(kind.to_string()))
    }
}

/// Min/max over an iterator of values; (0, 0) for an empty iterator
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Min-max normalization, clamped to [0, 1]; degenerate bounds map to 0
fn normalize(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if hi <= lo {
        0.0
    } else {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivitySpec;

    fn activity(name: &str, kind: &str, cost: f64, lo: u32, hi: u32) -> Activity {
        Activity::from_spec(ActivitySpec {
            name: name.to_string(),
            kind: kind.to_string(),
            cost,
            group_min: lo,
            group_max: hi,
            description: None,
        })
    }

    fn sample_catalog() -> Vec<Activity> {
        vec![
            activity("Hiking", "outdoor", 0.0, 1, 6),
            activity("Bowling", "indoor", 20.0, 2, 8),
            activity("Museum Visit", "cultural", 12.0, 1, 4),
        ]
    }

    #[test]
    fn test_dimension_is_kinds_plus_two() {
        let space = FeatureSpace::from_activities(&sample_catalog());
        assert_eq!(space.kinds().len(), 3);
        assert_eq!(space.dimension(), 5);
    }

    #[test]
    fn test_encode_is_deterministic_and_consistent() {
        let catalog = sample_catalog();
        let space = FeatureSpace::from_activities(&catalog);

        for a in &catalog {
            let first = space.encode_activity(a).unwrap();
            let second = space.encode_activity(a).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.len(), space.dimension());
        }
    }

    #[test]
    fn test_identical_attributes_identical_vectors() {
        let catalog = sample_catalog();
        let space = FeatureSpace::from_activities(&catalog);

        let twin = activity("Trail Walk", "outdoor", 0.0, 1, 6);
        let a = space.encode_activity(&catalog[0]).unwrap();
        let b = space.encode_activity(&twin).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_kind_fails() {
        let space = FeatureSpace::from_activities(&sample_catalog());
        let stranger = activity("Skydiving", "extreme", 200.0, 1, 2);
        let err = space.encode_activity(&stranger).unwrap_err();
        assert!(matches!(err, AppError::UnknownKind(k) if k == "extreme"));
    }

    #[test]
    fn test_unknown_preferred_kind_fails() {
        let space = FeatureSpace::from_activities(&sample_catalog());
        let mut prefs = UserPreference::new();
        prefs.preferred_kinds = vec!["extreme".to_string()];
        assert!(space.encode_preference(&prefs).is_err());
    }

    #[test]
    fn test_normalized_values_within_unit_interval() {
        let catalog = sample_catalog();
        let space = FeatureSpace::from_activities(&catalog);

        for a in &catalog {
            let v = space.encode_activity(a).unwrap();
            assert!(v.0.iter().all(|x| (0.0..=1.0).contains(x)));
        }
    }

    #[test]
    fn test_degenerate_bounds_normalize_to_zero() {
        let catalog = vec![
            activity("A", "outdoor", 10.0, 2, 4),
            activity("B", "indoor", 10.0, 2, 4),
        ];
        let space = FeatureSpace::from_activities(&catalog);
        let v = space.encode_activity(&catalog[0]).unwrap();
        // Cost and group slots collapse to 0 when all entries share a value
        assert_eq!(v.0[space.kinds().len()], 0.0);
        assert_eq!(v.0[space.kinds().len() + 1], 0.0);
    }

    #[test]
    fn test_budget_ceiling_clamped_to_catalog_bounds() {
        let catalog = sample_catalog();
        let space = FeatureSpace::from_activities(&catalog);

        let mut prefs = UserPreference::new();
        prefs.budget_ceiling = 1_000_000.0;
        let v = space.encode_preference(&prefs).unwrap();
        assert_eq!(v.0[space.kinds().len()], 1.0);
    }

    #[test]
    fn test_cosine_symmetry() {
        let catalog = sample_catalog();
        let space = FeatureSpace::from_activities(&catalog);
        let a = space.encode_activity(&catalog[0]).unwrap();
        let b = space.encode_activity(&catalog[1]).unwrap();
        assert_eq!(a.cosine(&b), b.cosine(&a));
    }

    #[test]
    fn test_cosine_zero_norm() {
        let zero = FeatureVector(vec![0.0, 0.0, 0.0]);
        let unit = FeatureVector(vec![1.0, 0.0, 0.0]);
        assert_eq!(zero.cosine(&unit), 0.0);
        assert_eq!(unit.cosine(&zero), 0.0);
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let catalog = sample_catalog();
        let space = FeatureSpace::from_activities(&catalog);
        let a = space.encode_activity(&catalog[0]).unwrap();
        assert!((a.cosine(&a) - 1.0).abs() < 1e-12);
    }
}
