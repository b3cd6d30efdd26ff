//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method check, static file
//! dispatch, then base headers and response hooks on every response.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Path as received, still percent-encoded
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<&'a str>,
    pub has_if_none_match: bool,
}

impl<'a> RequestContext<'a> {
    pub fn from_request<B>(req: &'a Request<B>) -> Self {
        Self {
            path: req.uri().path(),
            query: req.uri().query(),
            is_head: req.method() == Method::HEAD,
            if_modified_since: req
                .headers()
                .get("if-modified-since")
                .and_then(|v| v.to_str().ok()),
            has_if_none_match: req.headers().contains_key("if-none-match"),
        }
    }
}

/// Main entry point for HTTP request handling
///
/// Generic over the request body since only the head is ever read.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let response = match *req.method() {
        Method::GET | Method::HEAD => {
            let ctx = RequestContext::from_request(&req);
            static_files::serve(&ctx, &state).await
        }
        ref method => http::build_501_response(method.as_str()),
    };

    let response = http::with_base_headers(response, &state.server_name);
    Ok(state.hooks.apply(response))
}
