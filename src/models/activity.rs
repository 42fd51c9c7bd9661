use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable catalog entry describing one activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    /// Unique identifier, assigned at catalog load
    pub id: Uuid,
    /// Display name (e.g., "Hiking", "Movie Night")
    pub name: String,
    /// Categorical activity kind, lowercase (e.g., "outdoor", "indoor")
    pub kind: String,
    /// Cost per person in whole currency units
    pub cost: f64,
    /// Smallest group the activity works for
    pub group_min: u32,
    /// Largest group the activity works for
    pub group_max: u32,
    /// Optional free-text description shown to the user
    #[serde(default)]
    pub description: Option<String>,
}

/// Catalog file entry before an ID is assigned
///
/// The catalog JSON carries no identifiers; they are generated when the
/// catalog is loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivitySpec {
    pub name: String,
    pub kind: String,
    pub cost: f64,
    pub group_min: u32,
    pub group_max: u32,
    #[serde(default)]
    pub description: Option<String>,
}

impl Activity {
    /// Creates an activity from a catalog file entry, assigning a fresh ID
    pub fn from_spec(spec: ActivitySpec) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: spec.name,
            kind: spec.kind.to_lowercase(),
            cost: spec.cost,
            group_min: spec.group_min.min(spec.group_max),
            group_max: spec.group_max.max(spec.group_min),
            description: spec.description,
        }
    }

    /// Midpoint of the supported group-size range
    pub fn group_midpoint(&self) -> f64 {
        (self.group_min as f64 + self.group_max as f64) / 2.0
    }

    /// Whether a party of `size` people fits this activity
    pub fn fits_group(&self, size: u32) -> bool {
        self.group_min <= size && size <= self.group_max
    }
}
