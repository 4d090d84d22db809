//! Static file serving for the browser client.

use crate::error::ServerError;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// A file resolved for an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

/// Picks the MIME type from the request path.
///
/// Anything that mentions `.css` is a stylesheet, anything else that
/// mentions `.js` is a script, and everything else is served as HTML.
pub fn content_type_for(path: &str) -> &'static str {
    if path.contains(".css") {
        "text/css"
    } else if path.contains(".js") {
        "application/javascript"
    } else {
        "text/html"
    }
}

/// Drops the query string and fragment from a request target.
fn request_path_only(request_path: &str) -> &str {
    request_path.split(['?', '#']).next().unwrap_or_default()
}

/// Resolves request paths against a root directory.
#[derive(Debug, Clone)]
pub struct StaticContentServer {
    root: PathBuf,
}

impl StaticContentServer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a request path to a file below the root.
    ///
    /// `/` maps to `index.html`; query strings and fragments are ignored.
    /// Returns `None` for paths that would leave the root.
    pub fn file_path(&self, request_path: &str) -> Option<PathBuf> {
        let path = request_path_only(request_path);
        let path = if path == "/" { "/index.html" } else { path };

        let relative = Path::new(path.trim_start_matches('/'));
        if relative.as_os_str().is_empty()
            || !relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)))
        {
            return None;
        }

        Some(self.root.join(relative))
    }

    /// Loads the file behind `request_path`.
    ///
    /// The MIME type is picked from the same query-free path the file is
    /// read from.
    pub async fn resolve(&self, request_path: &str) -> Result<StaticFile, ServerError> {
        let path = request_path_only(request_path);
        let file_path = self.file_path(path).ok_or_else(|| {
            ServerError::Network(format!("Refusing to serve path outside root: {request_path}"))
        })?;

        let body = tokio::fs::read(&file_path).await?;
        debug!("📄 Serving {} ({} bytes)", file_path.display(), body.len());

        Ok(StaticFile {
            body,
            content_type: content_type_for(path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> (TempDir, StaticContentServer) {
        let dir = TempDir::new().expect("create temp dir");
        std::fs::write(dir.path().join("index.html"), "<h1>Rock Paper Scissors</h1>")
            .expect("write index");
        std::fs::write(dir.path().join("client.js"), "const ws = null;").expect("write script");
        std::fs::write(dir.path().join("style.css"), "body {}").expect("write stylesheet");
        let server = StaticContentServer::new(dir.path());
        (dir, server)
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("/style.css"), "text/css");
        assert_eq!(content_type_for("/client.js"), "application/javascript");
        assert_eq!(content_type_for("/index.html"), "text/html");
        assert_eq!(content_type_for("/"), "text/html");
        assert_eq!(content_type_for("/notes.txt"), "text/html");
        // Substring match, not an extension check
        assert_eq!(content_type_for("/app.json"), "application/javascript");
        assert_eq!(content_type_for("/a.css.js"), "text/css");
    }

    #[test]
    fn test_root_maps_to_index() {
        let server = StaticContentServer::new("static");
        assert_eq!(server.file_path("/"), Some(PathBuf::from("static/index.html")));
        assert_eq!(server.file_path("/?v=2"), Some(PathBuf::from("static/index.html")));
        assert_eq!(server.file_path("/css/app.css"), Some(PathBuf::from("static/css/app.css")));
    }

    #[test]
    fn test_traversal_is_refused() {
        let server = StaticContentServer::new("static");
        assert!(server.file_path("/../secret").is_none());
        assert!(server.file_path("/a/../../b").is_none());
        assert!(server.file_path("/./index.html").is_none());
        assert!(server.file_path("").is_none());
    }

    #[tokio::test]
    async fn test_resolve_existing_files() {
        let (_dir, server) = site();

        let index = server.resolve("/").await.expect("index exists");
        assert_eq!(index.content_type, "text/html");
        assert_eq!(index.body, b"<h1>Rock Paper Scissors</h1>");

        let script = server.resolve("/client.js").await.expect("script exists");
        assert_eq!(script.content_type, "application/javascript");

        let style = server.resolve("/style.css").await.expect("stylesheet exists");
        assert_eq!(style.content_type, "text/css");
    }

    #[tokio::test]
    async fn test_query_string_does_not_pick_content_type() {
        let dir = TempDir::new().expect("create temp dir");
        std::fs::write(dir.path().join("index.html"), "<p>index</p>").expect("write index");
        let server = StaticContentServer::new(dir.path());

        let file = server.resolve("/?v=style.css").await.expect("index exists");
        assert_eq!(file.content_type, "text/html");
        assert_eq!(file.body, b"<p>index</p>");

        let file = server.resolve("/index.html#client.js").await.expect("index exists");
        assert_eq!(file.content_type, "text/html");
    }

    #[tokio::test]
    async fn test_resolve_missing_file() {
        let (_dir, server) = site();
        assert!(matches!(server.resolve("/missing.html").await, Err(ServerError::Io(_))));
        assert!(matches!(server.resolve("/../etc/passwd").await, Err(ServerError::Network(_))));
    }
}
