//! Request and response values seen by the proxy.
//!
//! An [`Request`] is observed once per intercepted network operation and
//! discarded after it produces a response; only the method, the URL, and
//! the Accept header matter to the engine. A [`Snapshot`] is the immutable
//! stored copy of a response placed into a generation's store, keyed by
//! [`RequestIdentity`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use url::Url;

/// An intercepted network request.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method as the host reported it.
    pub method: String,
    /// Full request URL (scheme, origin, path, query).
    pub url: Url,
    /// Accept header value, if the request carried one.
    pub accept: Option<String>,
}

impl Request {
    /// Build a GET request for `url` with no Accept header.
    pub fn get(url: Url) -> Self {
        Self { method: "GET".to_string(), url, accept: None }
    }

    /// Attach an Accept header value.
    pub fn with_accept(mut self, accept: &str) -> Self {
        self.accept = Some(accept.to_string());
        self
    }

    /// The cache identity this request is keyed on.
    pub fn identity(&self) -> RequestIdentity {
        RequestIdentity::new(&self.method, &self.url)
    }

    /// Whether the method is GET (case-insensitive; hosts differ).
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }
}

/// The (method, URL) pair a stored snapshot is keyed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    /// Uppercased HTTP method.
    pub method: String,
    /// Serialized request URL.
    pub url: String,
}

impl RequestIdentity {
    pub fn new(method: &str, url: &Url) -> Self {
        Self { method: method.to_ascii_uppercase(), url: url.to_string() }
    }

    /// Content-addressed key used by the snapshot store.
    pub fn entry_key(&self) -> String {
        crate::store::hash::compute_entry_key(&self.method, &self.url)
    }
}

/// An immutable stored copy of a response.
///
/// Later snapshots for the same identity overwrite earlier ones;
/// individual entries are not versioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// HTTP status code.
    pub status: u16,
    /// Content-Type header value.
    pub content_type: Option<String>,
    /// Response headers (name, value), in arrival order.
    pub headers: Vec<(String, String)>,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// RFC 3339 timestamp of when the response was obtained.
    pub fetched_at: String,
}

impl Snapshot {
    /// Placeholder returned when a navigation finds no network, no cached
    /// entry, and no cached fallback document. Carries a success status:
    /// navigation must never observe a hard failure.
    pub fn offline_placeholder() -> Self {
        Self {
            status: 200,
            content_type: Some("text/plain".to_string()),
            headers: vec![("content-type".to_string(), "text/plain".to_string())],
            body: b"Offline".to_vec(),
            fetched_at: Utc::now().to_rfc3339(),
        }
    }

    /// Placeholder returned when a static asset is neither cached nor
    /// fetchable.
    pub fn unavailable_placeholder() -> Self {
        Self {
            status: 504,
            content_type: None,
            headers: Vec::new(),
            body: Vec::new(),
            fetched_at: Utc::now().to_rfc3339(),
        }
    }

    /// First header value with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
