//! HTTP response building module
//!
//! Both responses carry a single `Content-Type: text/html` header whatever the
//! file actually holds; hyper adds the framing headers.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::logger;

/// The only content type this server ever sends
pub const CONTENT_TYPE: &str = "text/html";

/// Build 200 OK response carrying the file bytes unchanged
pub fn build_file_response(data: Vec<u8>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", CONTENT_TYPE)
        .body(Full::new(Bytes::from(data)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response naming the requested path
pub fn build_not_found_response(display_path: &str) -> Response<Full<Bytes>> {
    let body = not_found_message(display_path);
    Response::builder()
        .status(404)
        .header("Content-Type", CONTENT_TYPE)
        .body(Full::new(Bytes::from(body.clone())))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from(body)))
        })
}

/// Body of the 404 response
fn not_found_message(display_path: &str) -> String {
    format!("ERROR: Cannot find '{display_path}'.")
}

fn log_build_error(kind: &str, err: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {kind} response: {err}"));
}
