//! The strata policy engine.
//!
//! Wires the request classifier, the two retrieval strategies, and the
//! generation lifecycle manager into the one-method handler interface a
//! host registers at startup. The host offers every intercepted request
//! to [`ProxyHandler::handle`]; lifecycle events go to
//! [`GenerationManager::install`] and [`GenerationManager::activate`].

pub mod classify;
pub mod handler;
pub mod lifecycle;
pub mod strategy;

#[cfg(test)]
mod testutil;

pub use classify::{Decision, classify};
pub use handler::{HandleOutcome, ProxyHandler};
pub use lifecycle::GenerationManager;
