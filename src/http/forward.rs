//! Request forwarding and streaming relay.
//!
//! # Responsibilities
//! - Build the outbound request: upstream base URL + inbound path-and-query
//!   verbatim, same method, same headers minus the credential
//! - Dispatch through the injected upstream client
//! - Relay the response body in bounded chunks as it arrives, without
//!   buffering the whole body
//!
//! # Design Decisions
//! - The upstream's real status code is forwarded; its headers are not.
//!   The relayed response always carries `Content-Type: application/json`
//! - Message-framing headers are dropped from the outbound request; hyper
//!   re-derives framing from the actual body stream
//! - A mid-body read error aborts the response; bytes already flushed to
//!   the client stay sent (streaming is not transactional)

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, Response, StatusCode},
    response::IntoResponse,
};
use bytes::Bytes;
use futures_util::StreamExt;
use thiserror::Error;

use crate::upstream::{DispatchError, UpstreamDispatch};

/// Upper bound on a single relayed body chunk.
pub const RELAY_CHUNK_SIZE: usize = 4096;

/// Content type set on every relayed response.
const RELAY_CONTENT_TYPE: &str = "application/json";

/// Why a request could not be relayed.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The outbound request could not be constructed (invalid method/URL
    /// combination). The upstream was never contacted.
    #[error("failed to build upstream request: {0}")]
    Build(#[from] axum::http::Error),

    /// The outbound dispatch failed (connection refused, DNS failure,
    /// upstream unreachable).
    #[error("upstream dispatch failed: {0}")]
    Dispatch(#[source] DispatchError),
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ForwardError::Build(_) => (StatusCode::BAD_REQUEST, "Bad request").into_response(),
            ForwardError::Dispatch(_) => {
                (StatusCode::BAD_GATEWAY, "Request failed").into_response()
            }
        }
    }
}

/// Relay an authorized inbound request to the upstream and stream the
/// response back.
pub async fn forward(
    dispatcher: &dyn UpstreamDispatch,
    upstream_url: &str,
    request: Request<Body>,
) -> Result<Response<Body>, ForwardError> {
    let outbound = build_upstream_request(upstream_url, request)?;
    let upstream = dispatcher
        .dispatch(outbound)
        .await
        .map_err(ForwardError::Dispatch)?;
    Ok(relay_response(upstream))
}

/// Build the outbound request mirroring the inbound one.
///
/// The path-and-query is appended to the upstream base URL byte-for-byte
/// (no re-encoding, no normalization). Headers pass through verbatim,
/// duplicates included, except:
/// - `Authorization`: the upstream must never see the client's credential
/// - `Host`: the upstream's own authority applies
/// - `Content-Length` / `Transfer-Encoding`: framing is re-derived from
///   the actual body stream
///
/// The body is handed over as-is, never buffered.
pub fn build_upstream_request(
    upstream_url: &str,
    request: Request<Body>,
) -> Result<Request<Body>, ForwardError> {
    let (parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("{upstream_url}{path_and_query}");

    let mut builder = Request::builder().method(parts.method).uri(url);
    if let Some(headers) = builder.headers_mut() {
        for (name, value) in parts.headers.iter() {
            if name == header::AUTHORIZATION
                || name == header::HOST
                || name == header::CONTENT_LENGTH
                || name == header::TRANSFER_ENCODING
            {
                continue;
            }
            headers.append(name.clone(), value.clone());
        }
    }

    Ok(builder.body(body)?)
}

/// Turn an upstream response into the client-facing response.
///
/// Keeps the upstream's status code, replaces its headers with the fixed
/// content type, and re-chunks the body so each relayed frame is at most
/// [`RELAY_CHUNK_SIZE`] bytes and is written out as soon as it is read.
fn relay_response(upstream: Response<Body>) -> Response<Body> {
    let (parts, body) = upstream.into_parts();
    let mut data = body.into_data_stream();

    let relay = async_stream::stream! {
        while let Some(read) = data.next().await {
            match read {
                Ok(mut chunk) => {
                    // Empty data frames are skipped, never treated as
                    // end-of-body.
                    while chunk.len() > RELAY_CHUNK_SIZE {
                        yield Ok::<Bytes, axum::Error>(chunk.split_to(RELAY_CHUNK_SIZE));
                    }
                    if !chunk.is_empty() {
                        yield Ok(chunk);
                    }
                }
                Err(error) => {
                    // The response head is already sent; all we can do is
                    // abort the stream. Flushed bytes stay sent.
                    tracing::error!(%error, "Upstream body read failed mid-stream");
                    yield Err(error);
                    return;
                }
            }
        }
    };

    let mut response = Body::from_stream(relay).into_response();
    *response.status_mut() = parts.status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(RELAY_CONTENT_TYPE));
    response
}
