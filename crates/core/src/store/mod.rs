//! SQLite-backed generation store.
//!
//! One database holds every cache generation. Each generation is a named
//! namespace of request-identity → response-snapshot entries. The module
//! provides:
//!
//! - Content-addressed entry keys (SHA-256 over the request identity)
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Registry operations: open-or-create, list, and delete generations

pub mod connection;
pub mod entries;
pub mod hash;
pub mod migrations;
pub mod registry;

use async_trait::async_trait;

pub use connection::GenerationStore;

use crate::Error;
use crate::collab::SnapshotStore;
use crate::http::{RequestIdentity, Snapshot};

#[async_trait]
impl SnapshotStore for GenerationStore {
    async fn open_generation(&self, name: &str) -> Result<(), Error> {
        GenerationStore::open_generation(self, name).await
    }

    async fn get(&self, generation: &str, identity: &RequestIdentity) -> Result<Option<Snapshot>, Error> {
        self.get_snapshot(generation, identity).await
    }

    async fn put(&self, generation: &str, identity: &RequestIdentity, snapshot: &Snapshot) -> Result<(), Error> {
        self.put_snapshot(generation, identity, snapshot).await
    }

    async fn delete_entry(&self, generation: &str, identity: &RequestIdentity) -> Result<bool, Error> {
        self.delete_snapshot(generation, identity).await
    }

    async fn list_generations(&self) -> Result<Vec<String>, Error> {
        GenerationStore::list_generations(self).await
    }

    async fn delete_generation(&self, name: &str) -> Result<bool, Error> {
        GenerationStore::delete_generation(self, name).await
    }
}
