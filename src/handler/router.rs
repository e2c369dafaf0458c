//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, dispatch to
//! the configured slice, and mapping of slice failures onto status codes.

use crate::config::AppState;
use crate::handler::SliceError;
use crate::http::{self, RequestLine};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// The request body is never read: metadata requests carry none.
pub async fn handle_request<B: Body>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let line = RequestLine::from_parts(req.method(), req.uri(), req.version());

    let response = match check_http_method(req.method()) {
        Some(resp) => resp,
        None => dispatch(&line, &req, &state).await,
    };

    if state.access_log {
        let entry = access_entry(&line, &req, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }
    Ok(response)
}

/// Only HEAD reaches the slice
///
/// A metadata response advertises the blob's length with an empty body, which
/// is only a well-formed exchange for HEAD.
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

async fn dispatch<B>(
    line: &RequestLine,
    req: &Request<B>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    match state
        .slice
        .response(&line.to_string(), req.headers(), Bytes::new())
        .await
    {
        Ok(response) => response,
        Err(SliceError::RequestLine(e)) => {
            logger::log_warning(&format!("Rejected request line: {e}"));
            http::build_400_response("malformed request line")
        }
        Err(SliceError::Storage(e)) => {
            logger::log_error(&format!("Storage lookup failed for '{line}': {e}"));
            http::build_500_response()
        }
    }
}

fn access_entry<B>(
    line: &RequestLine,
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: Option<SocketAddr>,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.map_or_else(|| "-".to_string(), |addr| addr.ip().to_string()),
        line.to_string(),
    );
    entry.status = response.status().as_u16();
    entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
        .unwrap_or(usize::MAX);
    entry.content_length = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());
    entry.user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}
