pub mod analytics;
pub mod sampler;
pub mod scoring;
pub mod stats;

pub use stats::{Bucket, UserStats};
