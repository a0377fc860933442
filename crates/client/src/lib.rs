//! Network client for strata.
//!
//! This crate provides the real network-fetch collaborator: a reqwest
//! client with URL canonicalization, byte and time limits, and an
//! HTTP-cache bypass mode for forced revalidation.

pub mod fetch;

pub use fetch::{FetchClient, FetchConfig, resolve_asset, same_origin};
