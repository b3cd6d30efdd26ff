//! HTTP protocol layer module
//!
//! MIME table, response hooks, cache validation and response builders,
//! decoupled from request routing.

pub mod cache;
pub mod hooks;
pub mod mime;
pub mod response;

pub use hooks::{CrossOriginIsolation, HookList, ResponseHook, StaticHeaders};
pub use mime::MimeTable;
pub use response::{
    build_301_response, build_304_response, build_404_response, build_501_response,
    build_file_response, build_html_response, with_base_headers,
};

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
