//! Content-addressed entry key generation.

use sha2::{Digest, Sha256};

/// Compute the store key for a request identity.
///
/// Keys on the method and the serialized URL, so two requests for the
/// same URL with different methods never collide.
pub fn compute_entry_key(method: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.as_bytes());
    hasher.update(b"\n");
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}
