//! Request eligibility and strategy selection.
//!
//! Pure decision function, invoked once per intercepted request. Only
//! same-origin GET requests are eligible; everything else passes through
//! to the host's native handling.

use strata_client::same_origin;
use strata_core::Request;
use url::Url;

/// Strategy decision for one intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Navigational (HTML) request: prefer live content.
    Navigation,
    /// Static asset: serve cached, refresh in the background.
    StaticAsset,
    /// Not eligible; the host handles it natively.
    PassThrough,
}

/// Classify an intercepted request.
///
/// A request is navigational when its Accept header mentions HTML or its
/// path looks like a document (trailing `/` or `.html`); all other
/// eligible requests are static assets.
pub fn classify(request: &Request, origin: &Url) -> Decision {
    if !request.is_get() {
        return Decision::PassThrough;
    }

    if !same_origin(&request.url, origin) {
        return Decision::PassThrough;
    }

    let accept = request.accept.as_deref().unwrap_or("");
    let path = request.url.path();

    if accept.contains("text/html") || path.ends_with('/') || path.ends_with(".html") {
        Decision::Navigation
    } else {
        Decision::StaticAsset
    }
}
