// src/config/models.rs
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::protocol::STATUS_HEALTHY;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// What the responder reports: its display name, the health status it
/// returns, and the endpoint registry served by `/api`. The defaults match
/// the values the service has always shipped with, so existing probers keep
/// working against an unconfigured instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_api_endpoints")]
    pub api_endpoints: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            status: default_status(),
            api_endpoints: default_api_endpoints(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.server.port != 0, "server.port must be non-zero");
        ensure!(!self.service.name.is_empty(), "service.name must not be empty");
        ensure!(
            !self.service.status.is_empty(),
            "service.status must not be empty"
        );
        ensure!(
            self.service.api_endpoints.iter().all(|h| !h.is_empty()),
            "service.api_endpoints entries must not be empty"
        );
        Ok(())
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    5000
}

fn default_service_name() -> String {
    "Instrumental API".to_owned()
}

fn default_status() -> String {
    STATUS_HEALTHY.to_owned()
}

fn default_api_endpoints() -> Vec<String> {
    [
        "ai.instrumental.com",
        "api.instrumental.com",
        "secure.factory-net.instrumental.com",
        "secure.factory-net-v2.instrumental.com",
    ]
    .iter()
    .map(|s| (*s).to_owned())
    .collect()
}
