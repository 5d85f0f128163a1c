//! Local static server for previewing the site.
//!
//! Serves the page directory, with the document tree mounted under the asset
//! prefix. Request paths are percent-decoded before lookup, so fetch URLs
//! built by [`crate::document_url`] resolve to the files the builder wrote.

use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};

use crate::error::SiteError;

#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Directory holding `index.html` and `index.json`.
    pub site_dir: PathBuf,
    /// Document tree served under `/{asset_prefix}/`.
    pub assets_dir: PathBuf,
    pub asset_prefix: String,
    pub bind: String,
}

/// Outcome of mapping a request path onto the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    File(PathBuf),
    NotFound,
    /// The path tried to leave the served directories.
    Forbidden,
    /// The path is not valid percent-encoded UTF-8.
    BadRequest,
}

impl ServeOptions {
    /// Map a request URL (path plus optional query) to a file.
    #[must_use]
    pub fn resolve(&self, url: &str) -> Resolved {
        let raw_path = url.split(['?', '#']).next().unwrap_or_default();
        let Ok(decoded) = urlencoding::decode(raw_path) else {
            return Resolved::BadRequest;
        };

        let mut segments = Vec::new();
        for segment in decoded.split('/').filter(|s| !s.is_empty()) {
            let is_plain = matches!(
                Path::new(segment).components().next(),
                Some(Component::Normal(_))
            ) && Path::new(segment).components().count() == 1;
            if !is_plain || segment.contains('\\') {
                return Resolved::Forbidden;
            }
            segments.push(segment);
        }

        let prefix = self.asset_prefix.trim_matches('/');
        let (base, rest) = match segments.split_first() {
            Some((first, rest)) if !prefix.is_empty() && *first == prefix => {
                (self.assets_dir.as_path(), rest)
            }
            _ => (self.site_dir.as_path(), segments.as_slice()),
        };

        let mut path = base.to_path_buf();
        path.extend(rest);
        if path.is_dir() {
            path.push("index.html");
        }

        if path.is_file() {
            Resolved::File(path)
        } else {
            Resolved::NotFound
        }
    }
}

/// Content type by file extension.
#[must_use]
pub fn content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("md") => "text/markdown; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Blocking HTTP server over [`ServeOptions`].
pub struct StaticServer {
    server: tiny_http::Server,
    options: ServeOptions,
}

impl StaticServer {
    /// Bind the listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Bind`] if the address is invalid or in use.
    pub fn bind(options: ServeOptions) -> Result<Self, SiteError> {
        let server = tiny_http::Server::http(&options.bind).map_err(|e| SiteError::Bind {
            addr: options.bind.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { server, options })
    }

    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serve requests until the process is stopped.
    pub fn run(&self) {
        for request in self.server.incoming_requests() {
            self.respond(request);
        }
    }

    /// Block for one request and answer it.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Io`] if receiving the request fails.
    pub fn serve_next(&self) -> Result<(), SiteError> {
        let request = self.server.recv().map_err(|source| SiteError::Io {
            path: self.options.site_dir.clone(),
            source,
        })?;
        self.respond(request);
        Ok(())
    }

    fn respond(&self, request: tiny_http::Request) {
        let url = request.url().to_string();

        if !matches!(request.method(), tiny_http::Method::Get | tiny_http::Method::Head) {
            let response = tiny_http::Response::from_string("method not allowed").with_status_code(405);
            finish(request, response, &url);
            return;
        }

        match self.options.resolve(&url) {
            Resolved::File(path) => match std::fs::File::open(&path) {
                Ok(file) => {
                    let mut response = tiny_http::Response::from_file(file);
                    if let Ok(header) =
                        tiny_http::Header::from_bytes("Content-Type", content_type(&path))
                    {
                        response.add_header(header);
                    }
                    tracing::debug!(%url, path = %path.display(), "200");
                    finish(request, response, &url);
                }
                Err(error) => {
                    tracing::warn!(%url, %error, "failed to open file");
                    let response = tiny_http::Response::from_string("read error").with_status_code(500);
                    finish(request, response, &url);
                }
            },
            Resolved::NotFound => {
                tracing::debug!(%url, "404");
                let response = tiny_http::Response::from_string("not found").with_status_code(404);
                finish(request, response, &url);
            }
            Resolved::Forbidden => {
                tracing::warn!(%url, "rejected path outside served directories");
                let response = tiny_http::Response::from_string("forbidden").with_status_code(403);
                finish(request, response, &url);
            }
            Resolved::BadRequest => {
                let response = tiny_http::Response::from_string("bad request").with_status_code(400);
                finish(request, response, &url);
            }
        }
    }
}

fn finish<R: std::io::Read>(request: tiny_http::Request, response: tiny_http::Response<R>, url: &str) {
    if let Err(error) = request.respond(response) {
        tracing::debug!(%url, %error, "client went away before response completed");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn fixture() -> (tempfile::TempDir, ServeOptions) {
        let dir = tempfile::tempdir().unwrap();
        let site_dir = dir.path().join("docs");
        let assets_dir = dir.path().join("generated");
        std::fs::create_dir_all(site_dir.join("css")).unwrap();
        std::fs::create_dir_all(assets_dir.join("Lipids")).unwrap();
        std::fs::write(site_dir.join("index.html"), "<html></html>").unwrap();
        std::fs::write(site_dir.join("index.json"), "{}").unwrap();
        std::fs::write(
            assets_dir.join("Lipids").join("001|Non-HDL Cholesterol|Non-HDL 胆固醇.md"),
            "# doc",
        )
        .unwrap();

        let options = ServeOptions {
            site_dir,
            assets_dir,
            asset_prefix: "assets".into(),
            bind: "127.0.0.1:0".into(),
        };
        (dir, options)
    }

    #[test]
    fn root_serves_index_html() {
        let (_dir, options) = fixture();
        assert_eq!(
            options.resolve("/"),
            Resolved::File(options.site_dir.join("index.html"))
        );
        assert_eq!(
            options.resolve("/index.json?v=2"),
            Resolved::File(options.site_dir.join("index.json"))
        );
    }

    #[test]
    fn encoded_document_url_maps_to_assets_dir() {
        let (_dir, options) = fixture();
        let url = "/assets/Lipids/001|Non-HDL%20Cholesterol|Non-HDL%20%E8%83%86%E5%9B%BA%E9%86%87.md";
        assert_eq!(
            options.resolve(url),
            Resolved::File(
                options
                    .assets_dir
                    .join("Lipids")
                    .join("001|Non-HDL Cholesterol|Non-HDL 胆固醇.md")
            )
        );
        // Browsers may escape the separator themselves.
        let escaped = "/assets/Lipids/001%7CNon-HDL%20Cholesterol%7CNon-HDL%20%E8%83%86%E5%9B%BA%E9%86%87.md";
        assert!(matches!(options.resolve(escaped), Resolved::File(_)));
    }

    #[rstest]
    #[case("/../secret")]
    #[case("/assets/%2E%2E/%2E%2E/etc/passwd")]
    #[case("/assets/Lipids/..%2F..%2Fx")]
    #[case("/a%5Cb")]
    fn traversal_is_forbidden(#[case] url: &str) {
        let (_dir, options) = fixture();
        assert_eq!(options.resolve(url), Resolved::Forbidden);
    }

    #[test]
    fn missing_and_invalid_paths() {
        let (_dir, options) = fixture();
        assert_eq!(options.resolve("/assets/Lipids/999|x|y.md"), Resolved::NotFound);
        assert_eq!(options.resolve("/%FF%FE"), Resolved::BadRequest);
    }

    #[rstest]
    #[case("a.html", "text/html; charset=utf-8")]
    #[case("index.JSON", "application/json; charset=utf-8")]
    #[case("001|a|b.md", "text/markdown; charset=utf-8")]
    #[case("blob", "application/octet-stream")]
    fn content_types(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(content_type(Path::new(name)), expected);
    }
}
