//! Collaborator seams between the engine and its host environment.
//!
//! The proxy engine talks to three external collaborators: the named
//! snapshot store, the network, and the host's client coordination
//! hooks. Each is a trait so the engine can be exercised with fakes.

use async_trait::async_trait;

use crate::Error;
use crate::http::{Request, RequestIdentity, Snapshot};

/// Options for a single network fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Force revalidation with the origin server, bypassing any
    /// intermediate HTTP cache.
    pub bypass_http_cache: bool,
}

impl FetchOptions {
    /// Options with the HTTP cache bypassed.
    pub fn bypass() -> Self {
        Self { bypass_http_cache: true }
    }
}

/// Named-store abstraction the strategies read and write through.
///
/// Stores are grouped into generations; within a generation, entries are
/// keyed by [`RequestIdentity`] and writes are last-write-wins.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Open the named generation, creating it if absent.
    async fn open_generation(&self, name: &str) -> Result<(), Error>;

    /// Look up the snapshot stored for `identity` in `generation`.
    async fn get(&self, generation: &str, identity: &RequestIdentity) -> Result<Option<Snapshot>, Error>;

    /// Store a snapshot, overwriting any prior entry for this identity.
    async fn put(&self, generation: &str, identity: &RequestIdentity, snapshot: &Snapshot) -> Result<(), Error>;

    /// Remove one entry. Returns whether an entry existed.
    async fn delete_entry(&self, generation: &str, identity: &RequestIdentity) -> Result<bool, Error>;

    /// All generation names known to the registry.
    async fn list_generations(&self) -> Result<Vec<String>, Error>;

    /// Delete a whole generation and its entries. Returns whether it existed.
    async fn delete_generation(&self, name: &str) -> Result<bool, Error>;
}

/// Network fetch collaborator.
#[async_trait]
pub trait NetworkFetch: Send + Sync {
    /// Issue the request.
    ///
    /// Transport failures (DNS, refused connection, timeout) are `Err`.
    /// An HTTP error status is still a response and comes back as `Ok`.
    async fn fetch(&self, request: &Request, options: FetchOptions) -> Result<Snapshot, Error>;
}

/// Host hooks controlling which handler instance serves open clients.
#[async_trait]
pub trait HostControl: Send + Sync {
    /// Let this instance become active without waiting for prior
    /// instances to finish.
    async fn skip_waiting(&self);

    /// Route already-connected clients through this instance from now on.
    async fn claim(&self) -> Result<(), Error>;
}
