// src/responder/service.rs
// Routing core of the responder: three routes, everything else rejected.

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Body, Method, Request, Response, StatusCode};
use serde::Serialize;

use super::{instance_name, EndpointRegistry};
use crate::config::ServiceConfig;
use crate::protocol::{self, HealthStatus, APPLICATION_JSON, INSTANCE_HEADER};

const ROOT_BODY: &str = "There is nothing here";

pub struct Responder {
    service_name: String,
    health_status: String,
    registry: EndpointRegistry,
    instance: Option<HeaderValue>,
}

impl Responder {
    pub fn new(service: ServiceConfig) -> Self {
        let instance = instance_name()
            .and_then(|name| HeaderValue::from_str(&name).ok());

        Self {
            service_name: service.name,
            health_status: service.status,
            registry: EndpointRegistry::new(service.api_endpoints),
            instance,
        }
    }

    /// Pin the instance identity instead of resolving the host name.
    pub fn with_instance(mut self, name: &str) -> Self {
        self.instance = HeaderValue::from_str(name).ok();
        self
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub async fn handle(&self, req: Request<Body>) -> Result<Response<Body>, ResponderError> {
        if req.method() != Method::GET {
            return Err(ResponderError::MethodNotAllowed {
                method: req.method().clone(),
            });
        }

        let path = req.uri().path().to_owned();

        // The root exists purely for load-balancer liveness probes, which
        // send no content-type header at all.
        if path == "/" {
            return self.text_response(ROOT_BODY);
        }

        // Everything else is API surface and must declare a JSON content
        // type (parameters such as charset are ignored).
        let declared = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        if !declared.is_some_and(protocol::is_json_media_type) {
            return Err(ResponderError::UnsupportedMediaType);
        }

        match path.as_str() {
            "/healthcheck" => self.json_response(&HealthStatus::new(
                &self.service_name,
                &self.health_status,
            )),
            "/api" => self.json_response(&self.registry.directory()),
            _ => Err(ResponderError::NotFound { path }),
        }
    }

    fn text_response(&self, body: &'static str) -> Result<Response<Body>, ResponderError> {
        let mut builder = Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "text/html");
        if let Some(instance) = &self.instance {
            builder = builder.header(INSTANCE_HEADER, instance.clone());
        }
        Ok(builder.body(Body::from(body))?)
    }

    fn json_response<T: Serialize>(&self, payload: &T) -> Result<Response<Body>, ResponderError> {
        let body = serde_json::to_vec(payload)?;
        let mut builder = Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, APPLICATION_JSON);
        if let Some(instance) = &self.instance {
            builder = builder.header(INSTANCE_HEADER, instance.clone());
        }
        Ok(builder.body(Body::from(body))?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    #[error("Wrong content type, acceptable content-type: application/json")]
    UnsupportedMediaType,

    #[error("Requested path \"{path}\" was not found on this server")]
    NotFound { path: String },

    #[error("Method {method} is not allowed")]
    MethodNotAllowed { method: Method },

    #[error("Failed to encode response: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Failed to build response: {0}")]
    Http(#[from] hyper::http::Error),
}

// Convert ResponderError to a well-formed HTTP error response; rejections
// never tear down the connection.
impl From<ResponderError> for Response<Body> {
    fn from(err: ResponderError) -> Self {
        let status = match &err {
            ResponderError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ResponderError::NotFound { .. } => StatusCode::NOT_FOUND,
            ResponderError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ResponderError::Encoding(_) | ResponderError::Http(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = err.to_string();
        Response::builder()
            .status(status)
            .body(Body::from(message))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Body::empty());
                *fallback.status_mut() = status;
                fallback
            })
    }
}
