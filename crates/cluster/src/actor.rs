use async_trait::async_trait;
use futures::FutureExt;
use protocol::{Envelope, Intent, names};
use runtime::{Actor, Context, panic_message};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::engine::ClusteringEngine;
use crate::{CLUSTERING_FAILED, MALFORMED_REQUEST};

/// Stateless relay between the conversation actor and a clustering engine.
pub struct ClusteringActor {
    engine: Arc<dyn ClusteringEngine>,
    timeout: Duration,
}

impl ClusteringActor {
    pub fn new(engine: Arc<dyn ClusteringEngine>) -> Self {
        Self {
            engine,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn cluster(&self, article: &str) -> String {
        let call = AssertUnwindSafe(self.engine.cluster(article)).catch_unwind();

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(Ok(result))) => {
                info!(result = %result, "Article clustered");
                result
            }
            Ok(Ok(Err(e))) => {
                warn!(error = %e, "Clustering engine failed");
                CLUSTERING_FAILED.to_string()
            }
            Ok(Err(panic)) => {
                error!(panic = panic_message(panic.as_ref()), "Clustering engine panicked");
                CLUSTERING_FAILED.to_string()
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "Clustering engine timed out");
                CLUSTERING_FAILED.to_string()
            }
        }
    }
}

#[async_trait]
impl Actor for ClusteringActor {
    async fn handle(&mut self, envelope: Envelope, ctx: &Context) {
        let payload = match &envelope.intent {
            Intent::ClusterArticle => match envelope.text() {
                Some(article) => self.cluster(article).await,
                None => {
                    warn!("Cluster request without article text");
                    MALFORMED_REQUEST.to_string()
                }
            },
            other => {
                debug!(intent = %other, "Ignoring intent");
                return;
            }
        };

        let Some(reply) = envelope.reply(payload) else {
            return;
        };
        if let Err(e) = ctx.send(names::CONVERSATION, &reply) {
            warn!(error = %e, "Failed to deliver response");
        }
    }
}
