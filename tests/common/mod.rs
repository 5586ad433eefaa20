//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::Request,
    http::{Response, StatusCode},
    routing::any,
    Json, Router,
};
use bytes::Bytes;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use ollama_gate::{HttpServer, ProxyConfig, Shutdown};

/// A mock upstream with a request counter.
pub struct MockUpstream {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicU32>,
}

impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hit_count(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn serve_app(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Start a mock upstream returning a fixed status and body, counting hits.
pub async fn start_fixed_upstream(status: StatusCode, body: String) -> MockUpstream {
    let hits = Arc::new(AtomicU32::new(0));
    let handler_hits = hits.clone();

    let handler = move || {
        let hits = handler_hits.clone();
        let body = body.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            (status, body)
        }
    };

    let app = Router::new()
        .route("/{*path}", any(handler.clone()))
        .route("/", any(handler));
    let addr = serve_app(app).await;

    MockUpstream { addr, hits }
}

/// Start a mock upstream that echoes the received method, path-and-query,
/// headers, and body as JSON.
pub async fn start_echo_upstream() -> SocketAddr {
    async fn echo(request: Request) -> Json<Value> {
        let (parts, body) = request.into_parts();
        let body = axum::body::to_bytes(body, 1024 * 1024)
            .await
            .unwrap_or_default();

        let headers: serde_json::Map<String, Value> = parts
            .headers
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    Value::String(String::from_utf8_lossy(v.as_bytes()).into_owned()),
                )
            })
            .collect();

        Json(json!({
            "method": parts.method.as_str(),
            "uri": parts.uri.to_string(),
            "headers": headers,
            "body": String::from_utf8_lossy(&body),
        }))
    }

    let app = Router::new()
        .route("/{*path}", any(echo))
        .route("/", any(echo));
    serve_app(app).await
}

/// Start a mock upstream that emits the given chunks with a gap between
/// them, so incremental delivery is observable on the wire.
pub async fn start_chunked_upstream(chunks: Vec<&'static str>, gap: Duration) -> SocketAddr {
    let handler = move || {
        let chunks = chunks.clone();
        async move {
            let stream = async_stream::stream! {
                for (i, chunk) in chunks.into_iter().enumerate() {
                    if i > 0 {
                        tokio::time::sleep(gap).await;
                    }
                    yield Ok::<_, std::convert::Infallible>(Bytes::from_static(chunk.as_bytes()));
                }
            };
            Response::new(Body::from_stream(stream))
        }
    };

    let app = Router::new()
        .route("/{*path}", any(handler.clone()))
        .route("/", any(handler));
    serve_app(app).await
}

/// Start a raw TCP upstream that sends a response head plus one chunk and
/// then drops the connection without terminating the chunked body.
pub async fn start_aborting_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let partial = "HTTP/1.1 200 OK\r\n\
                             Transfer-Encoding: chunked\r\n\r\n\
                             7\r\npartial\r\n";
                        let _ = socket.write_all(partial.as_bytes()).await;
                        let _ = socket.flush().await;
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        // Dropped here: no terminating chunk.
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Spawn the proxy under test on an ephemeral port.
///
/// The returned `Shutdown` must be kept alive for the duration of the test
/// and triggered at the end.
pub async fn spawn_proxy(upstream_url: String, token: &str) -> (SocketAddr, Shutdown) {
    let config = ProxyConfig {
        upstream_url,
        auth_token: token.to_string(),
        bind_address: "127.0.0.1:0".to_string(),
        cert_file: None,
        key_file: None,
        request_timeout_secs: None,
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// A plain client with no pooling surprises.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
