pub mod actor;
pub mod cache;
pub mod llm;
pub mod prompt;
pub mod replies;
pub mod schema;

pub use actor::ExtractionActor;
pub use cache::{EntityCache, Lookup, SessionCaches};
pub use llm::{OllamaAnnotator, OllamaClient};
pub use schema::{Annotation, AnnotationProvider};
