//! Response header hooks
//!
//! Hooks run on every response after the base headers are built, in
//! registration order, and only ever append.

use crate::error::ServerError;
use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::Response;
use std::collections::BTreeMap;
use std::fmt;

/// Adds headers to an outgoing response
pub trait ResponseHook: Send + Sync {
    fn apply(&self, headers: &mut HeaderMap);
}

/// `Cross-Origin-Opener-Policy: same-origin` and
/// `Cross-Origin-Embedder-Policy: require-corp`, required by browsers for
/// `SharedArrayBuffer` and threaded WASM
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossOriginIsolation;

impl ResponseHook for CrossOriginIsolation {
    fn apply(&self, headers: &mut HeaderMap) {
        headers.append(
            "cross-origin-opener-policy",
            HeaderValue::from_static("same-origin"),
        );
        headers.append(
            "cross-origin-embedder-policy",
            HeaderValue::from_static("require-corp"),
        );
    }
}

/// Fixed headers taken from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl StaticHeaders {
    /// Validate every name and value up front
    pub fn from_config(headers: &BTreeMap<String, String>) -> Result<Self, ServerError> {
        let headers = headers
            .iter()
            .map(|(name, value)| {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|_| ServerError::InvalidHeaderName(name.clone()))?;
                let value = HeaderValue::from_str(value)
                    .map_err(|_| ServerError::InvalidHeaderValue(name.to_string()))?;
                Ok((name, value))
            })
            .collect::<Result<Vec<_>, ServerError>>()?;
        Ok(Self { headers })
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl ResponseHook for StaticHeaders {
    fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.headers {
            headers.append(name.clone(), value.clone());
        }
    }
}

/// Ordered hooks applied to every response
#[derive(Default)]
pub struct HookList {
    hooks: Vec<Box<dyn ResponseHook>>,
}

impl HookList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hook: impl ResponseHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    #[must_use]
    pub fn with(mut self, hook: impl ResponseHook + 'static) -> Self {
        self.push(hook);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn apply<B>(&self, mut response: Response<B>) -> Response<B> {
        for hook in &self.hooks {
            hook.apply(response.headers_mut());
        }
        response
    }
}

impl fmt::Debug for HookList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookList")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
