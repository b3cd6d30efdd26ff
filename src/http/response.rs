//! HTTP response building module
//!
//! Builders for each status the static handler produces. Base headers shared
//! by every response (`Server`, `Date`) are added by [`with_base_headers`].

use super::cache::http_date;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, DATE, SERVER};
use hyper::{Response, StatusCode};
use std::time::SystemTime;

/// Build 200 response for a file
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    last_modified: SystemTime,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Last-Modified", http_date(last_modified))
        .body(Full::new(body))
        .unwrap_or_else(|e| fallback("200", &e))
}

/// Build 200 HTML response (directory listings)
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| fallback("HTML", &e))
}

/// Build 304 Not Modified response
pub fn build_304_response(last_modified: SystemTime) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("Last-Modified", http_date(last_modified))
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| fallback("304", &e))
}

/// Build 301 redirect, used to add the trailing slash to directory paths
pub fn build_301_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| fallback("301", &e))
}

/// Build 404 Not Found response
pub fn build_404_response(message: &str, is_head: bool) -> Response<Full<Bytes>> {
    build_error_response(StatusCode::NOT_FOUND, message, is_head)
}

/// Build 501 Not Implemented response for unsupported methods
pub fn build_501_response(method: &str) -> Response<Full<Bytes>> {
    build_error_response(
        StatusCode::NOT_IMPLEMENTED,
        &format!("Unsupported method ({method})"),
        false,
    )
}

/// Small HTML error page
pub fn build_error_response(status: StatusCode, message: &str, is_head: bool) -> Response<Full<Bytes>> {
    let html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Error response</title>\n</head>\n<body>\n<h1>Error response</h1>\n<p>Error code: {}</p>\n<p>Message: {}.</p>\n</body>\n</html>\n",
        status.as_u16(),
        super::escape_html(message),
    );
    let content_length = html.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(html)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .header("Connection", "close")
        .body(Full::new(body))
        .unwrap_or_else(|e| fallback(status.as_str(), &e))
}

/// Add `Server` and `Date`
pub fn with_base_headers<B>(mut response: Response<B>, server_name: &str) -> Response<B> {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(server_name) {
        headers.insert(SERVER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&http_date(SystemTime::now())) {
        headers.insert(DATE, value);
    }
    response
}

/// Log response build error and fall back to an empty 500
fn fallback(status: &str, error: &hyper::http::Error) -> Response<Full<Bytes>> {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_file_response() {
        let response = build_file_response(
            Bytes::from_static(b"\0asm"),
            "application/wasm",
            SystemTime::UNIX_EPOCH,
            false,
        );
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/wasm");
        assert_eq!(response.headers()["content-length"], "4");
        assert_eq!(
            response.headers()["last-modified"],
            "Thu, 01 Jan 1970 00:00:00 GMT"
        );
        assert_eq!(body_string(response).await, "\0asm");
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let response = build_file_response(
            Bytes::from_static(b"hello"),
            "text/plain",
            SystemTime::UNIX_EPOCH,
            true,
        );
        assert_eq!(response.headers()["content-length"], "5");
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_404_body_escapes_message() {
        let response = build_404_response("File <not> found", false);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_string(response).await;
        assert!(body.contains("Error code: 404"));
        assert!(body.contains("File &lt;not&gt; found"));
    }

    #[test]
    fn test_501_response() {
        let response = build_501_response("POST");
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_base_headers() {
        let response = with_base_headers(build_301_response("/docs/"), "webstage/0.1");
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()["location"], "/docs/");
        assert_eq!(response.headers()["server"], "webstage/0.1");
        assert!(response.headers()["date"]
            .to_str()
            .unwrap()
            .ends_with(" GMT"));
    }
}
