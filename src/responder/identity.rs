// src/responder/identity.rs
use tracing::warn;

/// Resolve the host network name reported in the `X-Instance` header.
///
/// Identity is diagnostic only: resolution failure means the header is
/// omitted, never that a request fails.
pub fn instance_name() -> Option<String> {
    match hostname::get() {
        Ok(name) => name.into_string().ok(),
        Err(err) => {
            warn!(%err, "could not resolve host name, X-Instance will be omitted");
            None
        }
    }
}
