//! HTTP response building module
//!
//! Provides builders for the status codes the blob handlers produce.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::headers;

/// Build 200 metadata response: headers only, empty body
pub fn build_metadata_response(path: &str, size: u64) -> Response<Full<Bytes>> {
    let (length_name, length_value) = headers::content_length(size);
    let (file_name, file_value) = headers::content_file_name(path);

    Response::builder()
        .status(200)
        .header(file_name, file_value)
        .header(length_name, length_value)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response with a UTF-8 text body
pub fn build_not_found_response(message: String) -> Response<Full<Bytes>> {
    let fallback = message.clone();
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", message.len())
        .body(Full::new(Bytes::from(message)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            let mut response = Response::new(Full::new(Bytes::from(fallback)));
            *response.status_mut() = hyper::StatusCode::NOT_FOUND;
            response
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "HEAD")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 400 Bad Request response
pub fn build_400_response(reason: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(400)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(format!("400 Bad Request: {reason}"))))
        .unwrap_or_else(|e| {
            log_build_error("400", &e);
            Response::new(Full::new(Bytes::from("400 Bad Request")))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("500 Internal Server Error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("500 Internal Server Error")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
