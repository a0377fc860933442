//! Retrieval strategies.
//!
//! Each strategy resolves an eligible request against the current
//! generation. Both are infallible by construction: every failure path
//! degrades to a cached or synthetic response.

pub mod network_first;
pub mod stale_while_revalidate;
