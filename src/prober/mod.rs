// src/prober/mod.rs
mod error;
mod probe;
mod report;
mod session;
mod target;

pub use error::ProbeError;
pub use probe::{probe_api, probe_health, ApiReport, HealthReport, API_PATH, HEALTHCHECK_PATH};
pub use report::{render_api, render_health};
pub use session::{Fetched, ProbeSession};
pub use target::{Target, DEFAULT_PORT};
