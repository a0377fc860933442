//! Stale-while-revalidate retrieval for static assets.
//!
//! The cache is the primary source: a hit returns immediately and the
//! network refresh runs in the background, so response latency is
//! independent of network latency. Only a miss waits on the network;
//! a miss the network cannot fill degrades to a synthetic 504.

use std::sync::Arc;

use strata_core::{FetchOptions, Request, Snapshot};

use crate::handler::ProxyHandler;

impl ProxyHandler {
    pub(crate) async fn stale_while_revalidate(&self, request: &Request) -> Snapshot {
        let identity = request.identity();
        let cached = self.lookup(&identity).await;

        let store = Arc::clone(&self.store);
        let fetcher = Arc::clone(&self.fetcher);
        let generation = self.generation.clone();
        let req = request.clone();
        let revalidate = async move {
            match fetcher.fetch(&req, FetchOptions::default()).await {
                Ok(fresh) => {
                    if let Err(e) = store.put(&generation, &req.identity(), &fresh).await {
                        tracing::warn!("cache write failed for {}: {e}", req.url);
                    }
                    Some(fresh)
                }
                Err(e) => {
                    tracing::debug!("background refresh failed for {}: {e}", req.url);
                    None
                }
            }
        };

        if let Some(snapshot) = cached {
            // Refresh opportunistically; the response does not wait on it.
            tokio::spawn(revalidate);
            return snapshot;
        }

        match revalidate.await {
            Some(fresh) => fresh,
            None => Snapshot::unavailable_placeholder(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::handler::ProxyHandler;
    use crate::testutil::{FakeFetcher, asset, snapshot, test_config};
    use strata_core::GenerationStore;

    async fn handler_with(fetcher: FakeFetcher) -> (ProxyHandler, Arc<GenerationStore>) {
        let store = Arc::new(GenerationStore::open_in_memory().await.unwrap());
        let handler = ProxyHandler::new(&test_config(), store.clone(), Arc::new(fetcher)).unwrap();
        (handler, store)
    }

    #[tokio::test]
    async fn test_cache_hit_does_not_wait_for_network() {
        // The fetcher never resolves; only a response that skips the
        // network can come back before the timeout.
        let (handler, store) = handler_with(FakeFetcher::hanging()).await;
        let request = asset("/app.js");
        let cached = snapshot("cached bundle");
        store
            .put_snapshot("v3", &request.identity(), &cached)
            .await
            .unwrap();

        let response = tokio::time::timeout(Duration::from_secs(1), handler.stale_while_revalidate(&request))
            .await
            .expect("cached response must not wait on the network");
        assert_eq!(response, cached);
    }

    #[tokio::test]
    async fn test_cache_hit_refreshes_in_background() {
        let (handler, store) = handler_with(FakeFetcher::online("fresh bundle")).await;
        let request = asset("/app.js");
        store
            .put_snapshot("v3", &request.identity(), &snapshot("stale bundle"))
            .await
            .unwrap();

        let response = handler.stale_while_revalidate(&request).await;
        assert_eq!(response.body, b"stale bundle");

        // The spawned refresh lands shortly after the response.
        let mut refreshed = Vec::new();
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            refreshed = store
                .get_snapshot("v3", &request.identity())
                .await
                .unwrap()
                .unwrap()
                .body;
            if refreshed == b"fresh bundle" {
                break;
            }
        }
        assert_eq!(refreshed, b"fresh bundle");
    }

    #[tokio::test]
    async fn test_cache_miss_waits_for_network_and_stores() {
        let (handler, store) = handler_with(FakeFetcher::online("fetched bundle")).await;
        let request = asset("/app.js");

        let response = handler.stale_while_revalidate(&request).await;
        assert_eq!(response.body, b"fetched bundle");

        let stored = store
            .get_snapshot("v3", &request.identity())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.body, b"fetched bundle");
    }

    #[tokio::test]
    async fn test_cache_miss_offline_yields_gateway_timeout() {
        let (handler, _store) = handler_with(FakeFetcher::offline()).await;

        let response = handler.stale_while_revalidate(&asset("/app.js")).await;
        assert_eq!(response.status, 504);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn test_background_failure_keeps_cached_entry() {
        let (handler, store) = handler_with(FakeFetcher::offline()).await;
        let request = asset("/app.js");
        let cached = snapshot("cached bundle");
        store
            .put_snapshot("v3", &request.identity(), &cached)
            .await
            .unwrap();

        let response = handler.stale_while_revalidate(&request).await;
        assert_eq!(response, cached);

        tokio::time::sleep(Duration::from_millis(50)).await;
        let kept = store
            .get_snapshot("v3", &request.identity())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept, cached);
    }
}
