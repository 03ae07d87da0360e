// src/prober/probe.rs
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Fetched, ProbeError, ProbeSession};
use crate::protocol::{ApiDirectory, HealthStatus};

pub const HEALTHCHECK_PATH: &str = "/healthcheck";
pub const API_PATH: &str = "/api";

/// Outcome of a `/healthcheck` probe.
#[derive(Debug)]
pub struct HealthReport {
    pub instance: Option<String>,
    pub health: HealthStatus,
}

/// Outcome of an `/api` probe.
#[derive(Debug)]
pub struct ApiReport {
    pub instance: Option<String>,
    pub endpoints: Vec<String>,
}

/// Fetch `/healthcheck`. A status other than `healthy` is still a success
/// here; interpretation is left to the renderer.
pub async fn probe_health(session: &ProbeSession) -> Result<HealthReport, ProbeError> {
    let Fetched { body, instance } = session.fetch(HEALTHCHECK_PATH).await?;
    let health = parse_payload(body)?;
    Ok(HealthReport { instance, health })
}

/// Fetch `/api` and split the directory into individual hostnames.
pub async fn probe_api(session: &ProbeSession) -> Result<ApiReport, ProbeError> {
    let Fetched { body, instance } = session.fetch(API_PATH).await?;
    let directory: ApiDirectory = parse_payload(body)?;
    Ok(ApiReport {
        instance,
        endpoints: directory.hostnames(),
    })
}

fn parse_payload<T: DeserializeOwned>(body: Value) -> Result<T, ProbeError> {
    serde_json::from_value(body).map_err(|err| ProbeError::Parse(err.to_string()))
}
