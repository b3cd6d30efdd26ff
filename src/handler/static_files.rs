//! Static file serving module
//!
//! Maps request paths onto the document root and serves files, index pages
//! and directory listings.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Index files tried, in order, for a directory request
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Serve a GET or HEAD request from the document root
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let Some(relative) = translate_path(ctx.path) else {
        return http::build_404_response("File not found", ctx.is_head);
    };
    let mut file_path = state.root.join(&relative);

    if fs::metadata(&file_path).await.is_ok_and(|m| m.is_dir()) {
        if !ctx.path.ends_with('/') {
            return http::build_301_response(&redirect_location(ctx));
        }
        match find_index(&file_path).await {
            Some(index) => file_path = index,
            None => return listing::list_directory(ctx, &file_path).await,
        }
    } else if ctx.path.ends_with('/') {
        return http::build_404_response("File not found", ctx.is_head);
    }

    serve_file(ctx, state, &file_path).await
}

/// Serve a single file with `Last-Modified` validation
async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    file_path: &Path,
) -> Response<Full<Bytes>> {
    let Ok(metadata) = fs::metadata(file_path).await else {
        return http::build_404_response("File not found", ctx.is_head);
    };
    let modified = metadata.modified().unwrap_or(std::time::SystemTime::UNIX_EPOCH);

    // If-None-Match takes precedence; no ETags are issued so it never matches
    if !ctx.has_if_none_match && cache::not_modified_since(ctx.if_modified_since, modified) {
        return http::build_304_response(modified);
    }

    let content = match fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_warning(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response("File not found", ctx.is_head);
        }
    };

    http::build_file_response(
        Bytes::from(content),
        state.mime.content_type(file_path),
        modified,
        ctx.is_head,
    )
}

/// Turn a request path into a path relative to the document root
///
/// The path is percent-decoded, then `.` and empty segments are dropped and
/// `..` pops the previous segment, so the result never leaves the root.
/// Returns `None` for paths that do not decode to UTF-8, contain NUL, or
/// carry a segment that is not a single plain file name (`\` separators,
/// drive prefixes).
pub fn translate_path(path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(path).ok()?;
    if decoded.contains('\0') {
        return None;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if is_plain_name(s) => segments.push(s),
            _ => return None,
        }
    }
    Some(segments.iter().collect())
}

fn is_plain_name(segment: &str) -> bool {
    if segment.contains('\\') {
        return false;
    }
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

async fn find_index(dir: &Path) -> Option<PathBuf> {
    for name in INDEX_FILES {
        let candidate = dir.join(name);
        if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
            return Some(candidate);
        }
    }
    None
}

/// Same path with a trailing slash, query preserved
fn redirect_location(ctx: &RequestContext<'_>) -> String {
    match ctx.query {
        Some(q) => format!("{}/?{q}", ctx.path),
        None => format!("{}/", ctx.path),
    }
}
