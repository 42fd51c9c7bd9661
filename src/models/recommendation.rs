use serde::Serialize;

use super::Activity;

/// A scored catalog entry returned from a ranking query
///
/// Ephemeral: recomputed on every query, never stored.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub activity: Activity,
    /// Biased similarity score; pinned activities report their raw similarity
    pub score: f64,
    /// Whether the activity was pinned to the top regardless of score
    pub pinned: bool,
}
