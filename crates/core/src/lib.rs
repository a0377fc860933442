//! Core types and shared functionality for strata.
//!
//! This crate provides:
//! - Request, identity, and snapshot types seen by the proxy
//! - The SQLite-backed generation store
//! - Collaborator traits between the engine and its host
//! - Unified error types
//! - Configuration structures

pub mod collab;
pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use collab::{FetchOptions, HostControl, NetworkFetch, SnapshotStore};
pub use config::ProxyConfig;
pub use error::Error;
pub use http::{Request, RequestIdentity, Snapshot};
pub use store::GenerationStore;
