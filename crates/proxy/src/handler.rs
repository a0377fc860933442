//! The proxy's request-handler interface.
//!
//! A [`ProxyHandler`] is built once at startup from configuration plus
//! the store and network collaborators; the host registers it and offers
//! every intercepted request to [`ProxyHandler::handle`]. Requests the
//! proxy declines come back as an explicit [`HandleOutcome::NotHandled`]
//! rather than an ambient default path.

use std::sync::Arc;

use strata_core::config::ConfigError;
use strata_core::{NetworkFetch, ProxyConfig, Request, RequestIdentity, Snapshot, SnapshotStore};
use url::Url;

use crate::classify::{Decision, classify};

/// Outcome of offering an intercepted request to the proxy.
#[derive(Debug)]
pub enum HandleOutcome {
    /// The proxy resolved the request to a response.
    Handled(Snapshot),
    /// The request is not eligible; the host's native path should run.
    NotHandled,
}

impl HandleOutcome {
    /// The response, if the proxy produced one.
    pub fn into_response(self) -> Option<Snapshot> {
        match self {
            HandleOutcome::Handled(snapshot) => Some(snapshot),
            HandleOutcome::NotHandled => None,
        }
    }
}

/// The caching proxy's single-method handler.
pub struct ProxyHandler {
    pub(crate) store: Arc<dyn SnapshotStore>,
    pub(crate) fetcher: Arc<dyn NetworkFetch>,
    pub(crate) generation: String,
    pub(crate) origin: Url,
    pub(crate) fallback_url: Url,
}

impl ProxyHandler {
    /// Build a handler for the configured origin and generation.
    pub fn new(
        config: &ProxyConfig, store: Arc<dyn SnapshotStore>, fetcher: Arc<dyn NetworkFetch>,
    ) -> Result<Self, ConfigError> {
        let origin_url = config.origin_url()?;
        let fallback_url = strata_client::resolve_asset(&origin_url, &config.fallback_document)
            .map_err(|e| ConfigError::Invalid { field: "fallback_document".into(), reason: e.to_string() })?;

        Ok(Self {
            store,
            fetcher,
            generation: config.generation.clone(),
            origin: origin_url,
            fallback_url,
        })
    }

    /// Resolve one intercepted request.
    ///
    /// Infallible: an eligible request always produces some response,
    /// an ineligible one comes back as [`HandleOutcome::NotHandled`].
    pub async fn handle(&self, request: &Request) -> HandleOutcome {
        match classify(request, &self.origin) {
            Decision::PassThrough => HandleOutcome::NotHandled,
            Decision::Navigation => HandleOutcome::Handled(self.network_first(request).await),
            Decision::StaticAsset => HandleOutcome::Handled(self.stale_while_revalidate(request).await),
        }
    }

    /// Cache lookup that degrades read failures to a miss.
    pub(crate) async fn lookup(&self, identity: &RequestIdentity) -> Option<Snapshot> {
        match self.store.get(&self.generation, identity).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("cache read failed for {}: {e}", identity.url);
                None
            }
        }
    }

    /// Cache write that swallows failures: a failed write never aborts a
    /// response.
    pub(crate) async fn store_snapshot(&self, identity: &RequestIdentity, snapshot: &Snapshot) {
        if let Err(e) = self.store.put(&self.generation, identity, snapshot).await {
            tracing::warn!("cache write failed for {}: {e}", identity.url);
        }
    }
}
