use async_trait::async_trait;
use futures::FutureExt;
use protocol::{Category, Envelope, Intent, SessionId, names};
use runtime::{Actor, Context, panic_message};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::cache::{EntityCache, Lookup, SessionCaches};
use crate::replies;
use crate::schema::AnnotationProvider;

/// Owns the entity caches and answers extraction and category requests.
///
/// Requests are served one at a time from the mailbox, so a slow provider
/// call delays every category query queued behind it.
pub struct ExtractionActor {
    provider: Arc<dyn AnnotationProvider>,
    caches: SessionCaches,
    timeout: Duration,
}

impl ExtractionActor {
    pub fn new(provider: Arc<dyn AnnotationProvider>) -> Self {
        Self {
            provider,
            caches: SessionCaches::new(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Upper bound for one provider call; exceeding it counts as a failed extraction.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[instrument(skip(self, envelope), fields(session = %envelope.session))]
    async fn extract(&mut self, envelope: &Envelope) -> String {
        let Some(article) = envelope.text() else {
            warn!("Extraction request without article text");
            return replies::MALFORMED_REQUEST.to_string();
        };
        let session = &envelope.session;

        self.caches.reset(session);

        let annotations = match tokio::time::timeout(self.timeout, self.provider.annotate(article)).await {
            Ok(Ok(annotations)) => annotations,
            Ok(Err(e)) => {
                warn!(error = %e, "Annotation provider failed");
                return replies::EXTRACTION_FAILED.to_string();
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "Annotation provider timed out");
                return replies::EXTRACTION_FAILED.to_string();
            }
        };

        if annotations.is_empty() {
            info!("Annotation provider returned nothing");
            return replies::EXTRACTION_FAILED.to_string();
        }

        let cache = EntityCache::from_annotations(&annotations);
        info!(
            annotations = annotations.len(),
            values = cache.total_values(),
            "Article processed"
        );
        self.caches.install(session, cache);

        replies::EXTRACTION_SUCCEEDED.to_string()
    }

    fn get_category(&self, category: Category, session: &SessionId) -> String {
        match self.caches.lookup(session, category) {
            Lookup::NotProcessed => replies::NOT_PROCESSED.to_string(),
            Lookup::Empty => replies::NOTHING_FOUND.to_string(),
            Lookup::Found(values) => replies::listing(category, &values),
        }
    }

    fn get_unsupported(&self, tag: &str, session: &SessionId) -> String {
        debug!(category = tag, "Query for unsupported category");
        if self.caches.is_processed(session) {
            replies::NOTHING_FOUND.to_string()
        } else {
            replies::NOT_PROCESSED.to_string()
        }
    }
}

#[async_trait]
impl Actor for ExtractionActor {
    async fn handle(&mut self, envelope: Envelope, ctx: &Context) {
        let payload = match &envelope.intent {
            Intent::ExtractFromArticle => {
                match AssertUnwindSafe(self.extract(&envelope)).catch_unwind().await {
                    Ok(payload) => payload,
                    Err(panic) => {
                        self.caches.reset(&envelope.session);
                        error!(panic = panic_message(panic.as_ref()), "Extraction panicked");
                        replies::INTERNAL_ERROR.to_string()
                    }
                }
            }
            Intent::GetExtracted(category) => self.get_category(*category, &envelope.session),
            Intent::GetUnsupported(tag) => self.get_unsupported(tag, &envelope.session),
            Intent::EndSession => {
                if self.caches.evict(&envelope.session) {
                    info!(session = %envelope.session, "Session cache evicted");
                }
                return;
            }
            other => {
                debug!(intent = %other, "Ignoring intent");
                return;
            }
        };

        let Some(reply) = envelope.reply(payload) else {
            return;
        };
        if let Err(e) = ctx.send(names::CONVERSATION, &reply) {
            warn!(error = %e, intent = %reply.intent, "Failed to deliver response");
        }
    }
}
