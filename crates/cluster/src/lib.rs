pub mod actor;
pub mod engine;
pub mod topic;

pub use actor::ClusteringActor;
pub use engine::{ClusteringEngine, UnavailableClusterer};
pub use topic::OllamaTopicClient;

/// Reply when the engine fails, times out or panics.
pub const CLUSTERING_FAILED: &str = "Sorry, I could not cluster that article.";
pub const MALFORMED_REQUEST: &str = "Sorry, I could not read that request.";
