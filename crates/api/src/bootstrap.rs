use anyhow::Result;
use cluster::{ClusteringActor, ClusteringEngine};
use conversation::{ChatFrontend, ConversationActor};
use extract::{AnnotationProvider, ExtractionActor};
use protocol::names;
use runtime::ActorSystem;
use std::sync::Arc;
use tracing::info;

use crate::config::ActorConfig;

/// Start the three actors under their well-known names.
pub fn start_actors(
    config: &ActorConfig,
    frontend: Arc<dyn ChatFrontend>,
    provider: Arc<dyn AnnotationProvider>,
    engine: Arc<dyn ClusteringEngine>,
) -> Result<ActorSystem> {
    let timeout = config.provider_timeout();
    let mut system = ActorSystem::new();

    system.spawn(names::EXTRACTOR, ExtractionActor::new(provider).with_timeout(timeout))?;
    system.spawn(names::CLUSTERER, ClusteringActor::new(engine).with_timeout(timeout))?;
    system.spawn(names::CONVERSATION, ConversationActor::new(frontend))?;

    info!(actors = ?system.directory().names(), "Actor system ready");
    Ok(system)
}
