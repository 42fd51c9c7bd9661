use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-activity user signal that biases future rankings
///
/// Neutral is represented by absence from the feedback mapping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Liked,
    Disliked,
    Pinned,
}

/// Mutable session state: filtering constraints plus accumulated feedback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPreference {
    /// Preferred activity kinds; empty means any kind
    pub preferred_kinds: Vec<String>,
    /// Maximum acceptable cost per person
    pub budget_ceiling: f64,
    /// Number of people in the party
    pub group_size: u32,
    /// Feedback state per activity; absent means neutral
    pub feedback: HashMap<Uuid, Feedback>,
}

impl Default for UserPreference {
    fn default() -> Self {
        Self::new()
    }
}

impl UserPreference {
    /// Creates an unconstrained preference with no feedback
    pub fn new() -> Self {
        Self {
            preferred_kinds: Vec::new(),
            budget_ceiling: f64::MAX,
            group_size: 1,
            feedback: HashMap::new(),
        }
    }

    /// Records a like, clearing a previous dislike
    pub fn like(&mut self, activity_id: Uuid) {
        self.feedback.insert(activity_id, Feedback::Liked);
    }

    /// Records a dislike, clearing a previous like
    pub fn dislike(&mut self, activity_id: Uuid) {
        self.feedback.insert(activity_id, Feedback::Disliked);
    }

    /// Pins an activity so it always appears at the top of results
    pub fn pin(&mut self, activity_id: Uuid) {
        self.feedback.insert(activity_id, Feedback::Pinned);
    }

    /// Resets an activity to neutral
    pub fn clear(&mut self, activity_id: Uuid) {
        self.feedback.remove(&activity_id);
    }

    /// Current feedback state for an activity, if any
    pub fn feedback_for(&self, activity_id: &Uuid) -> Option<Feedback> {
        self.feedback.get(activity_id).copied()
    }

    /// IDs of all liked activities
    pub fn liked(&self) -> Vec<Uuid> {
        self.with_state(Feedback::Liked)
    }

    /// IDs of all disliked activities
    pub fn disliked(&self) -> Vec<Uuid> {
        self.with_state(Feedback::Disliked)
    }

    /// IDs of all pinned activities
    pub fn pinned(&self) -> Vec<Uuid> {
        self.with_state(Feedback::Pinned)
    }

    fn with_state(&self, state: Feedback) -> Vec<Uuid> {
        self.feedback
            .iter()
            .filter(|(_, s)| **s == state)
            .map(|(id, _)| *id)
            .collect()
    }
}
