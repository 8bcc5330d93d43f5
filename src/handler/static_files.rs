//! Static file serving module
//!
//! Resolves request paths against the serving root, reads the file and maps
//! the outcome onto a response. Every read failure becomes the same 404; the
//! distinct cause only reaches the diagnostic log.

use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A request path mapped onto the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Request path without its leading `/`, echoed in logs and error bodies
    pub display: String,
    /// Path handed to the filesystem
    pub fs_path: PathBuf,
}

/// Why a resolved path could not be served
#[derive(Debug)]
pub enum ReadError {
    /// Resolved outside the serving root while confinement is enabled
    OutsideRoot,
    Io(io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideRoot => write!(f, "outside the serving root"),
            Self::Io(e) => match e.kind() {
                io::ErrorKind::NotFound => write!(f, "not found"),
                io::ErrorKind::PermissionDenied => write!(f, "permission denied"),
                _ => write!(f, "{e}"),
            },
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutsideRoot => None,
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Strip exactly one leading `/` and join the rest onto `root`
///
/// No normalization happens: `..` segments are kept and a second leading
/// `/` yields an absolute path that replaces `root`.
pub fn resolve_target(root: &Path, request_path: &str) -> ResolvedPath {
    let relative = request_path.strip_prefix('/').unwrap_or(request_path);
    ResolvedPath {
        display: relative.to_string(),
        fs_path: root.join(relative),
    }
}

/// Read the whole file behind `target`
pub async fn read_target(
    root: &Path,
    target: &ResolvedPath,
    confine_to_root: bool,
) -> Result<Vec<u8>, ReadError> {
    let path = if confine_to_root {
        confine(root, &target.fs_path).await?
    } else {
        target.fs_path.clone()
    };

    Ok(fs::read(&path).await?)
}

/// Canonicalize `path` and require it to lie under the canonical `root`
async fn confine(root: &Path, path: &Path) -> Result<PathBuf, ReadError> {
    let root_canonical = fs::canonicalize(root).await?;
    let path_canonical = fs::canonicalize(path).await?;
    if path_canonical.starts_with(&root_canonical) {
        Ok(path_canonical)
    } else {
        Err(ReadError::OutsideRoot)
    }
}

/// Serve a resolved path: 200 with the file bytes, 404 on any failure
pub async fn serve_target(
    root: &Path,
    target: &ResolvedPath,
    confine_to_root: bool,
) -> Response<Full<Bytes>> {
    match read_target(root, target, confine_to_root).await {
        Ok(content) => {
            logger::log_found(&target.display);
            http::build_file_response(content)
        }
        Err(e) => {
            if matches!(e, ReadError::OutsideRoot) {
                logger::log_warning(&format!(
                    "Path traversal attempt blocked: {}",
                    target.fs_path.display()
                ));
            }
            logger::log_not_found(&target.display, &e.to_string());
            http::build_not_found_response(&target.display)
        }
    }
}
