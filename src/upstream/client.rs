//! Shared HTTP client for upstream dispatch.

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

/// Transport-level dispatch failure (connect error, DNS failure, reset).
pub type DispatchError = Box<dyn std::error::Error + Send + Sync>;

/// Sends a fully built outbound request to the upstream server.
///
/// Implementations must be safe for concurrent use: one instance serves
/// every in-flight request.
pub trait UpstreamDispatch: Send + Sync {
    /// Dispatch the request and resolve to the upstream's response.
    ///
    /// The response body is a live stream; the caller is responsible for
    /// draining or dropping it.
    fn dispatch(&self, request: Request<Body>)
        -> BoxFuture<'_, Result<Response<Body>, DispatchError>>;
}

/// Production dispatcher: a single shared hyper client with default
/// transport settings. Constructed once at startup and injected into the
/// request-handling state.
#[derive(Clone)]
pub struct HttpUpstream {
    client: Client<HttpConnector, Body>,
}

impl HttpUpstream {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }
}

impl Default for HttpUpstream {
    fn default() -> Self {
        Self::new()
    }
}

impl UpstreamDispatch for HttpUpstream {
    fn dispatch(
        &self,
        request: Request<Body>,
    ) -> BoxFuture<'_, Result<Response<Body>, DispatchError>> {
        Box::pin(async move {
            let response = self.client.request(request).await?;
            Ok(response.map(Body::new))
        })
    }
}
