// src/prober/error.rs
use thiserror::Error;

/// Probe failure taxonomy.
///
/// Only `Configuration` is fatal to a run. Every other variant is caught at
/// the point of use, rendered as a single diagnostic line, and the remaining
/// probes still execute: one broken endpoint never prevents reporting on the
/// other.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("remote endpoint {endpoint} is inaccessible: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message}, status code: {status}, reason: {reason}")]
    Protocol {
        message: String,
        status: u16,
        reason: String,
    },

    #[error("server response is not parseable: {0}")]
    Parse(String),
}

impl ProbeError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProbeError::Configuration(_))
    }

    pub(crate) fn wrong_content_type(status: u16, reason: &str) -> Self {
        ProbeError::Protocol {
            message: "wrong content type received".to_owned(),
            status,
            reason: reason.to_owned(),
        }
    }

    pub(crate) fn error_status(status: u16, reason: &str) -> Self {
        ProbeError::Protocol {
            message: "server returned error".to_owned(),
            status,
            reason: reason.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_errors_carry_status_and_reason() {
        let err = ProbeError::error_status(503, "Service Unavailable");
        let rendered = err.to_string();
        assert!(rendered.contains("503"));
        assert!(rendered.contains("Service Unavailable"));
    }

    #[test]
    fn only_configuration_errors_are_fatal() {
        assert!(ProbeError::Configuration("bad target".to_owned()).is_fatal());
        assert!(!ProbeError::wrong_content_type(200, "OK").is_fatal());
        assert!(!ProbeError::Parse("missing field".to_owned()).is_fatal());
    }
}
