// src/protocol/mod.rs
// Wire contract shared by the responder and the prober.

use serde::{Deserialize, Serialize};

/// Media type required on every non-root request and carried by every JSON
/// response.
pub const APPLICATION_JSON: &str = "application/json";

/// Response header naming the instance that served the request.
pub const INSTANCE_HEADER: &str = "X-Instance";

/// Well-known status value signalling a nominal service. Any other string is
/// rendered as degraded/unknown; there is no enumerated set of error states.
pub const STATUS_HEALTHY: &str = "healthy";

/// Separator between hostnames in an `ApiDirectory`.
const ENDPOINT_SEPARATOR: &str = ", ";

/// Body of a `/healthcheck` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub service: String,
    pub status: String,
}

impl HealthStatus {
    pub fn new(service: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            status: status.into(),
        }
    }

    pub fn is_nominal(&self) -> bool {
        self.status == STATUS_HEALTHY
    }
}

/// Body of an `/api` response: registered hostnames joined with `", "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDirectory {
    pub api_endpoints: String,
}

impl ApiDirectory {
    pub fn from_hostnames<I, S>(hostnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let api_endpoints = hostnames
            .into_iter()
            .map(|name| name.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(ENDPOINT_SEPARATOR);

        Self { api_endpoints }
    }

    /// The empty string means zero registered endpoints, not one empty entry.
    pub fn hostnames(&self) -> Vec<String> {
        if self.api_endpoints.is_empty() {
            return Vec::new();
        }

        self.api_endpoints
            .split(ENDPOINT_SEPARATOR)
            .map(str::to_owned)
            .collect()
    }
}

/// Main-type/sub-type match against `application/json`, ignoring parameters
/// such as `charset` and ASCII case.
pub fn is_json_media_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or("").trim();
    essence.eq_ignore_ascii_case(APPLICATION_JSON)
}
