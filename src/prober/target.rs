// src/prober/target.rs
use super::ProbeError;

/// Port used when the target URL carries no usable port.
pub const DEFAULT_PORT: u16 = 5000;

/// Parsed `scheme://host[:port]` target.
///
/// Port recovery is deliberately lenient: a missing, non-numeric or
/// out-of-range port falls back to the default so a sloppy target string
/// still produces a probe attempt. Scheme and host have no such tolerance,
/// since no connection is possible without them; scheme *validation* is
/// deferred to connect time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    /// True when the default port was substituted for a missing or invalid
    /// one; callers warn on it before connecting.
    pub defaulted_port: bool,
}

impl Target {
    pub fn resolve(raw: &str, default_port: u16) -> Result<Self, ProbeError> {
        let (scheme, rest) = raw.split_once("://").ok_or_else(|| {
            ProbeError::Configuration(format!("invalid target URL: \"{raw}\""))
        })?;

        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ProbeError::Configuration(format!(
                "invalid scheme in target URL: \"{raw}\""
            )));
        }

        // Anything past the authority (path, query, fragment) is ignored.
        let authority = rest.split(['/', '?', '#']).next().unwrap_or("");

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        };

        if host.is_empty()
            || !host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
        {
            return Err(ProbeError::Configuration(format!(
                "invalid host in target URL: \"{raw}\""
            )));
        }

        let (port, defaulted_port) = match port.and_then(parse_port) {
            Some(port) => (port, false),
            None => (default_port, true),
        };

        Ok(Self {
            scheme: scheme.to_owned(),
            host: host.to_owned(),
            port,
            defaulted_port,
        })
    }

    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

/// Valid TCP ports are 1-65535; everything else is treated as absent.
fn parse_port(raw: &str) -> Option<u16> {
    raw.parse::<u32>()
        .ok()
        .filter(|port| (1..=65535).contains(port))
        .map(|port| port as u16)
}
