//! Directory listing page

use crate::handler::router::RequestContext;
use crate::http::{self, escape_html};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fmt::Write;
use std::path::Path;
use tokio::fs;

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Directories end with `/`, symlinks with `@`
    fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else if self.is_symlink {
            format!("{}@", self.name)
        } else {
            self.name.clone()
        }
    }

    fn href(&self) -> String {
        let encoded = urlencoding::encode(&self.name);
        if self.is_dir {
            format!("{encoded}/")
        } else {
            encoded.into_owned()
        }
    }
}

/// Render the listing for `dir`, or 404 if it cannot be read
pub async fn list_directory(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    match read_entries(dir).await {
        Ok(entries) => {
            let display_path = urlencoding::decode(ctx.path)
                .map_or_else(|_| ctx.path.to_string(), |p| p.into_owned());
            http::build_html_response(render(&display_path, &entries), ctx.is_head)
        }
        Err(e) => {
            crate::logger::log_warning(&format!(
                "Cannot list directory '{}': {e}",
                dir.display()
            ));
            http::build_404_response("No permission to list directory", ctx.is_head)
        }
    }
}

/// Read and sort entries case-insensitively
pub async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let file_type = entry.file_type().await?;
        let is_symlink = file_type.is_symlink();
        let is_dir = if is_symlink {
            fs::metadata(entry.path()).await.is_ok_and(|m| m.is_dir())
        } else {
            file_type.is_dir()
        };
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }
    entries.sort_by_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Build the listing HTML page
pub fn render(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for entry in entries {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape_html(&entry.href()),
            escape_html(&entry.display_name()),
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            is_dir,
            is_symlink: false,
        }
    }

    #[test]
    fn test_render_marks_directories() {
        let html = render("/", &[entry("formulas", true), entry("script.js", false)]);
        assert!(html.contains("<title>Directory listing for /</title>"));
        assert!(html.contains("<li><a href=\"formulas/\">formulas/</a></li>"));
        assert!(html.contains("<li><a href=\"script.js\">script.js</a></li>"));
    }

    #[test]
    fn test_render_escapes_names() {
        let html = render("/a&b/", &[entry("x <y>.js", false)]);
        assert!(html.contains("Directory listing for /a&amp;b/"));
        assert!(html.contains("href=\"x%20%3Cy%3E.js\""));
        assert!(html.contains(">x &lt;y&gt;.js<"));
    }

    #[test]
    fn test_symlink_suffix() {
        let link = ListingEntry {
            name: "latest".to_string(),
            is_dir: false,
            is_symlink: true,
        };
        assert_eq!(link.display_name(), "latest@");
        assert_eq!(link.href(), "latest");
    }

    #[tokio::test]
    async fn test_read_entries_sorted_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.js"), "").unwrap();
        std::fs::write(dir.path().join("A.js"), "").unwrap();
        std::fs::create_dir(dir.path().join("c")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A.js", "b.js", "c"]);
        assert!(entries[2].is_dir);
    }

    #[tokio::test]
    async fn test_read_entries_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_entries(&dir.path().join("gone")).await.is_err());
    }
}
