//! Shared fakes and fixtures for engine tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;

use strata_core::{Error, FetchOptions, HostControl, NetworkFetch, ProxyConfig, Request, Snapshot};

pub const ORIGIN: &str = "https://app.example";

pub fn test_config() -> ProxyConfig {
    ProxyConfig { generation: "v3".to_string(), origin: ORIGIN.to_string(), ..Default::default() }
}

pub fn absolute(path: &str) -> Url {
    Url::parse(ORIGIN).unwrap().join(path).unwrap()
}

/// A navigational request: GET with an HTML Accept header.
pub fn navigation(path: &str) -> Request {
    Request::get(absolute(path)).with_accept("text/html,application/xhtml+xml")
}

/// A static-asset request: GET with no Accept header.
pub fn asset(path: &str) -> Request {
    Request::get(absolute(path))
}

pub fn snapshot(body: &str) -> Snapshot {
    Snapshot {
        status: 200,
        content_type: Some("text/plain".to_string()),
        headers: vec![("content-type".to_string(), "text/plain".to_string())],
        body: body.as_bytes().to_vec(),
        fetched_at: "2026-01-01T00:00:00+00:00".to_string(),
    }
}

enum FakeOutcome {
    Respond(Snapshot),
    Offline,
    Hang,
}

/// Scriptable network collaborator.
///
/// Records every call as (url, bypass_http_cache) so tests can assert
/// which strategy drove the fetch.
pub struct FakeFetcher {
    default: FakeOutcome,
    overrides: HashMap<String, FakeOutcome>,
    calls: Arc<Mutex<Vec<(String, bool)>>>,
}

impl FakeFetcher {
    /// Every fetch succeeds with a 200 response carrying `body`.
    pub fn online(body: &str) -> Self {
        Self {
            default: FakeOutcome::Respond(snapshot(body)),
            overrides: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every fetch fails with a transport error.
    pub fn offline() -> Self {
        Self {
            default: FakeOutcome::Offline,
            overrides: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every fetch never resolves.
    pub fn hanging() -> Self {
        Self {
            default: FakeOutcome::Hang,
            overrides: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail fetches of one specific path regardless of the default.
    pub fn with_failure(mut self, path: &str) -> Self {
        self.overrides
            .insert(absolute(path).to_string(), FakeOutcome::Offline);
        self
    }

    /// Handle to the recorded (url, bypass) call list.
    pub fn call_log(&self) -> Arc<Mutex<Vec<(String, bool)>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl NetworkFetch for FakeFetcher {
    async fn fetch(&self, request: &Request, options: FetchOptions) -> Result<Snapshot, Error> {
        self.calls
            .lock()
            .unwrap()
            .push((request.url.to_string(), options.bypass_http_cache));

        let outcome = self
            .overrides
            .get(request.url.as_str())
            .unwrap_or(&self.default);

        match outcome {
            FakeOutcome::Respond(snapshot) => Ok(snapshot.clone()),
            FakeOutcome::Offline => Err(Error::Network("connection refused".to_string())),
            FakeOutcome::Hang => std::future::pending::<Result<Snapshot, Error>>().await,
        }
    }
}

/// Host-control collaborator that records its calls.
#[derive(Default)]
pub struct FakeHost {
    pub skip_waiting_calls: AtomicUsize,
    pub claim_calls: AtomicUsize,
    fail_claim: bool,
}

impl FakeHost {
    /// A host whose claim call always fails.
    pub fn failing_claim() -> Self {
        Self { fail_claim: true, ..Default::default() }
    }
}

#[async_trait]
impl HostControl for FakeHost {
    async fn skip_waiting(&self) {
        self.skip_waiting_calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn claim(&self) -> Result<(), Error> {
        self.claim_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_claim {
            return Err(Error::Network("no client registry".to_string()));
        }
        Ok(())
    }
}
