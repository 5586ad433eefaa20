//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router (catch-all routes, no route table)
//! - Wire up middleware (tracing, optional whole-request timeout)
//! - Gate every request on the bearer authorizer
//! - Hand authorized requests to the forwarder
//! - Serve plaintext or TLS, with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::Authorizer;
use crate::config::ProxyConfig;
use crate::http::forward;
use crate::upstream::{HttpUpstream, UpstreamDispatch};

/// Immutable per-request context injected into the handler.
///
/// Cloned per request; nothing in it is mutable after construction.
#[derive(Clone)]
pub struct AppState {
    pub authorizer: Authorizer,
    pub dispatcher: Arc<dyn UpstreamDispatch>,
    pub upstream_url: Arc<str>,
}

/// HTTP server for the authenticating proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server with the production upstream client.
    pub fn new(config: ProxyConfig) -> Self {
        Self::with_dispatcher(config, Arc::new(HttpUpstream::new()))
    }

    /// Create a server with an injected dispatcher. This is the seam test
    /// doubles plug into.
    pub fn with_dispatcher(config: ProxyConfig, dispatcher: Arc<dyn UpstreamDispatch>) -> Self {
        let state = AppState {
            authorizer: Authorizer::new(config.auth_token.clone()),
            dispatcher,
            upstream_url: config.upstream_url.as_str().into(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with the middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        // Off by default: a hanging upstream holds the connection open.
        if let Some(secs) = config.request_timeout_secs {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(secs)));
        }

        router
    }

    /// Run the plaintext server on the given listener until shutdown.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Starting HTTP server");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the TLS server on the given address until shutdown.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(address = %addr, "Starting HTTPS server");

        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            shutdown_handle.graceful_shutdown(Some(Duration::from_secs(5)));
        });

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(app)
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler: authorize, strip the credential, forward, relay.
async fn proxy_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let credential = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !state.authorizer.authorize(credential) {
        tracing::warn!(client = %addr, "Authorization failed");
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    tracing::debug!(
        client = %addr,
        method = %request.method(),
        path = %request.uri().path(),
        "Proxying request"
    );

    match forward::forward(state.dispatcher.as_ref(), &state.upstream_url, request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(client = %addr, %error, "Forwarding failed");
            error.into_response()
        }
    }
}
