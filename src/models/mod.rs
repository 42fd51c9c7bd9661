pub mod activity;
pub mod preference;
pub mod recommendation;

pub use activity::{Activity, ActivitySpec};
pub use preference::{Feedback, UserPreference};
pub use recommendation::Recommendation;
