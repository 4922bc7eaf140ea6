pub mod cache;
pub mod classifier;
pub mod wikipedia;

pub use cache::CacheStore;
pub use classifier::HumanClassifier;
pub use wikipedia::{WikiApi, WikipediaService};
