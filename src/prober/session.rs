// src/prober/session.rs
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::{ProbeError, Target};
use crate::protocol::{APPLICATION_JSON, INSTANCE_HEADER};

/// A fetched JSON payload plus the identity of the instance that served it,
/// when the server disclosed one.
#[derive(Debug)]
pub struct Fetched {
    pub body: serde_json::Value,
    pub instance: Option<String>,
}

/// One session against a responder, reused for every probe in a run.
///
/// Connection establishment is lazy; transport failures surface at request
/// time as `ProbeError::Transport`.
#[derive(Debug)]
pub struct ProbeSession {
    client: Client,
    base: Url,
}

impl ProbeSession {
    pub fn connect(target: &Target, timeout: Duration) -> Result<Self, ProbeError> {
        match target.scheme.as_str() {
            "http" | "https" => {}
            other => {
                return Err(ProbeError::Configuration(format!(
                    "unknown protocol: \"{other}\""
                )));
            }
        }

        let base = Url::parse(&target.base_url()).map_err(|err| {
            ProbeError::Configuration(format!(
                "invalid target URL \"{}\": {err}",
                target.base_url()
            ))
        })?;

        let client = Client::builder().timeout(timeout).build().map_err(|err| {
            ProbeError::Configuration(format!("failed to build HTTP client: {err}"))
        })?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// GET `path` declaring a JSON content type, validate the response, and
    /// parse its body.
    ///
    /// The content-type check runs before the status check so a mismatch is
    /// reported as such even on an error status.
    pub async fn fetch(&self, path: &str) -> Result<Fetched, ProbeError> {
        let url = self.base.join(path).map_err(|err| {
            ProbeError::Configuration(format!("invalid endpoint path \"{path}\": {err}"))
        })?;

        debug!(%url, "checking endpoint");

        let response = self
            .client
            .get(url.clone())
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .send()
            .await
            .map_err(|source| ProbeError::Transport {
                endpoint: url.to_string(),
                source,
            })?;

        let instance = response
            .headers()
            .get(INSTANCE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        if let Some(instance) = &instance {
            debug!(%instance, "reading response from instance");
        }

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("unknown");

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if content_type != APPLICATION_JSON {
            return Err(ProbeError::wrong_content_type(status.as_u16(), reason));
        }

        if status != StatusCode::OK {
            return Err(ProbeError::error_status(status.as_u16(), reason));
        }

        let text = response
            .text()
            .await
            .map_err(|source| ProbeError::Transport {
                endpoint: url.to_string(),
                source,
            })?;
        let body =
            serde_json::from_str(&text).map_err(|err| ProbeError::Parse(err.to_string()))?;

        Ok(Fetched { body, instance })
    }
}
