// src/server/handler.rs
use hyper::{Body, Request, Response};
use std::sync::Arc;
use tower::Service;

use crate::responder::Responder;

#[derive(Clone)]
pub struct RequestHandler {
    responder: Arc<Responder>,
}

impl RequestHandler {
    pub fn new(responder: Arc<Responder>) -> Self {
        Self { responder }
    }
}

impl Service<Request<Body>> for RequestHandler {
    type Response = Response<Body>;
    type Error = Box<dyn std::error::Error + Send + Sync>;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let responder = self.responder.clone();
        Box::pin(async move {
            match responder.handle(req).await {
                Ok(response) => Ok(response),
                // Rejections become well-formed HTTP error responses; a
                // malformed request must never take the process down.
                Err(err) => {
                    tracing::debug!(%err, "request rejected");
                    Ok(err.into())
                }
            }
        })
    }
}
