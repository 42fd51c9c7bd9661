pub mod encoder;
pub mod ranker;

pub use encoder::{FeatureSpace, FeatureVector};
pub use ranker::recommend;
