// responses/static_files.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use mime::Mime;
use std::path::{Component, Path, PathBuf};

/// Resolve a request path inside `root`. Anything that could escape it
/// (`..`, absolute or prefixed components) resolves to nothing.
pub fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }
    if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }
    Some(root.join(relative))
}

fn content_type(path: &Path) -> Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("html") | Some("htm") => mime::TEXT_HTML_UTF_8,
        Some("css") => mime::TEXT_CSS_UTF_8,
        Some("js") => mime::APPLICATION_JAVASCRIPT_UTF_8,
        Some("json") => mime::APPLICATION_JSON,
        Some("png") => mime::IMAGE_PNG,
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("svg") => mime::IMAGE_SVG,
        Some("txt") => mime::TEXT_PLAIN_UTF_8,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// Serve a file from the static directory, or `NotFound`.
pub fn static_file_response(root: &Path, request_path: &str) -> ResultResp {
    let path = resolve(root, request_path).ok_or(ServerError::NotFound)?;
    if !path.is_file() {
        return Err(ServerError::NotFound);
    }

    let bytes = std::fs::read(&path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "static file unreadable");
        ServerError::NotFound
    })?;

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type(&path).as_ref())
        .body(Body::from(bytes))
        .map_err(|_| ServerError::InternalError)
}
