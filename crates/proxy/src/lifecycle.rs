//! Generation lifecycle management.
//!
//! The generation manager owns the identity of the current cache
//! generation across the host's install and activate events. Install
//! opens the generation and seeds it with the core asset list; activate
//! retires every other generation and claims open clients. No lifecycle
//! failure ever escapes to the host: the app must never be blocked from
//! loading by cache maintenance.

use std::sync::Arc;

use futures_util::future::join_all;
use url::Url;

use strata_core::config::ConfigError;
use strata_core::{Error, FetchOptions, HostControl, NetworkFetch, ProxyConfig, Request, SnapshotStore};

/// Coordinates generation creation, seeding, and retirement.
pub struct GenerationManager {
    store: Arc<dyn SnapshotStore>,
    fetcher: Arc<dyn NetworkFetch>,
    host: Arc<dyn HostControl>,
    generation: String,
    origin: Url,
    core_assets: Vec<String>,
}

impl GenerationManager {
    /// Build a manager for the configured generation and asset list.
    pub fn new(
        config: &ProxyConfig, store: Arc<dyn SnapshotStore>, fetcher: Arc<dyn NetworkFetch>,
        host: Arc<dyn HostControl>,
    ) -> Result<Self, ConfigError> {
        let origin = config.origin_url()?;

        Ok(Self {
            store,
            fetcher,
            host,
            generation: config.generation.clone(),
            origin,
            core_assets: config.core_assets.clone(),
        })
    }

    /// Handle the host's install event.
    ///
    /// Activates immediately rather than waiting for prior instances,
    /// opens the current generation, and seeds it with the core assets.
    /// Seeding is best-effort: any failure is logged and swallowed, so
    /// an offline install still completes.
    pub async fn install(&self) {
        self.host.skip_waiting().await;

        if let Err(e) = self.store.open_generation(&self.generation).await {
            tracing::warn!("could not open generation {}: {e}", self.generation);
            return;
        }

        if let Err(e) = self.seed_core_assets().await {
            tracing::warn!("core asset seeding skipped: {e}");
        }
    }

    /// Fetch every core asset and store the snapshots.
    ///
    /// All-or-nothing: snapshots are written only if every fetch
    /// succeeded, so a generation never holds a partial shell.
    async fn seed_core_assets(&self) -> Result<(), Error> {
        let mut requests = Vec::with_capacity(self.core_assets.len());
        for path in &self.core_assets {
            let url = strata_client::resolve_asset(&self.origin, path)
                .map_err(|e| Error::InvalidUrl(e.to_string()))?;
            requests.push(Request::get(url));
        }

        let results = join_all(
            requests
                .iter()
                .map(|request| self.fetcher.fetch(request, FetchOptions::default())),
        )
        .await;

        let mut seeded = Vec::with_capacity(requests.len());
        for (request, result) in requests.iter().zip(results) {
            seeded.push((request.identity(), result?));
        }

        for (identity, snapshot) in &seeded {
            self.store.put(&self.generation, identity, snapshot).await?;
        }

        tracing::debug!("seeded {} core assets into {}", seeded.len(), self.generation);
        Ok(())
    }

    /// Handle the host's activate event.
    ///
    /// Deletes every generation other than the current one (deletions
    /// run concurrently and are awaited together), then claims open
    /// clients so already-loaded pages use this instance immediately.
    pub async fn activate(&self) {
        match self.store.list_generations().await {
            Ok(names) => {
                let stale: Vec<String> = names.into_iter().filter(|name| *name != self.generation).collect();

                let deletions = join_all(stale.iter().map(|name| self.store.delete_generation(name))).await;
                for (name, result) in stale.iter().zip(deletions) {
                    match result {
                        Ok(true) => tracing::debug!("deleted stale generation {name}"),
                        Ok(false) => {}
                        Err(e) => tracing::warn!("could not delete generation {name}: {e}"),
                    }
                }
            }
            Err(e) => tracing::warn!("could not enumerate generations: {e}"),
        }

        if let Err(e) = self.host.claim().await {
            tracing::warn!("client claim failed: {e}");
        }
    }
}
