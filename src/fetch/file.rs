//! Local-file transport for `file://` URLs and bare paths.

use super::{Fetch, FetchError, FetchResponse};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Serves `file://` URLs from disk.
///
/// A missing file answers with status 404 rather than an error, so the
/// caller sees the same shape a network transport would give it. Bare
/// absolute or relative paths are accepted as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl FileFetcher {
    /// Create a file transport.
    pub fn new() -> Self {
        Self
    }

    fn resolve(url: &str) -> Result<PathBuf, FetchError> {
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }
        if url.contains("://") {
            return Err(FetchError::UnsupportedScheme(url.to_string()));
        }
        Ok(PathBuf::from(url))
    }
}

impl Fetch for FileFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let path = Self::resolve(url)?;
        match std::fs::read_to_string(&path) {
            Ok(body) => Ok(FetchResponse::new(200, body)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Library file not found");
                Ok(FetchResponse::new(404, ""))
            }
            Err(source) => Err(FetchError::Io { path, source }),
        }
    }
}
