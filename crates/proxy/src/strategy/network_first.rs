//! Network-first retrieval for navigational requests.
//!
//! Freshness over availability: the network is always attempted first,
//! with the HTTP cache bypassed so stale intermediaries cannot pin an
//! old document. The cache is consulted only after the network fails
//! (never raced), and the fallback chain ends in a synthetic offline
//! response, so a navigation never observes a hard failure.

use strata_core::{FetchOptions, Request, RequestIdentity, Snapshot};

use crate::handler::ProxyHandler;

impl ProxyHandler {
    pub(crate) async fn network_first(&self, request: &Request) -> Snapshot {
        let identity = request.identity();

        match self.fetcher.fetch(request, FetchOptions::bypass()).await {
            Ok(fresh) => {
                self.store_snapshot(&identity, &fresh).await;
                fresh
            }
            Err(e) => {
                tracing::debug!("network-first falling back for {}: {e}", request.url);

                if let Some(cached) = self.lookup(&identity).await {
                    return cached;
                }

                let shell = RequestIdentity::new("GET", &self.fallback_url);
                if let Some(cached_shell) = self.lookup(&shell).await {
                    return cached_shell;
                }

                Snapshot::offline_placeholder()
            }
        }
    }
}
