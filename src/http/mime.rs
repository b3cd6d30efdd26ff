//! MIME type table
//!
//! Maps file extensions to Content-Type values. The table is an explicit
//! value handed to the server, never global state.

use std::collections::HashMap;
use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Built-in extension map
const DEFAULT_TYPES: &[(&str, &str)] = &[
    // Text
    ("html", "text/html; charset=utf-8"),
    ("htm", "text/html; charset=utf-8"),
    ("css", "text/css"),
    ("txt", "text/plain; charset=utf-8"),
    ("md", "text/plain; charset=utf-8"),
    ("xml", "application/xml"),
    // JavaScript
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("json", "application/json"),
    ("map", "application/json"),
    // Images
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("webp", "image/webp"),
    // Video
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("ogv", "video/ogg"),
    // Audio
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    // Fonts
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    // Documents
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("tar", "application/x-tar"),
];

/// Entries the dev server adds on top of the defaults
const DEV_SERVER_TYPES: &[(&str, &str)] = &[
    ("wasm", "application/wasm"),
    ("wbn", "application/webbundle"),
];

/// Extension -> Content-Type lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl MimeTable {
    /// An empty table; every lookup yields `application/octet-stream`
    fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Defaults plus `.wasm` and `.wbn`
    pub fn for_dev_server() -> Self {
        let mut table = Self::default();
        for (ext, content_type) in DEV_SERVER_TYPES {
            table.insert(ext, *content_type);
        }
        table
    }

    /// Add or replace an entry. `".wasm"`, `"wasm"` and `"WASM"` are the same key.
    pub fn insert(&mut self, extension: &str, content_type: impl Into<String>) {
        self.types
            .insert(normalize(extension), content_type.into());
    }

    /// Extend with entries, later ones winning
    #[must_use]
    pub fn with_entries<'a, I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (ext, content_type) in entries {
            self.insert(ext, content_type.as_str());
        }
        self
    }

    /// Look up by bare extension
    pub fn get(&self, extension: &str) -> Option<&str> {
        self.types.get(&normalize(extension)).map(String::as_str)
    }

    /// Content-Type for a file path, falling back to `application/octet-stream`
    pub fn content_type(&self, path: &Path) -> &str {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| self.get(e))
            .unwrap_or(OCTET_STREAM)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (ext, content_type) in DEFAULT_TYPES {
            table.insert(ext, *content_type);
        }
        table
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}
