//! Collection index: fetch a JSON document and turn its `collection`
//! array into an id lookup.
//!
//! The transport sits behind [`Fetch`] so the mapping logic is testable
//! without I/O. The binary uses [`FileFetcher`] to load a local library
//! fixture; any other transport only has to implement `get`.
//!
//! # Document shape
//!
//! ```json
//! { "collection": [ { "id": 17 }, { "id": "a3f" } ] }
//! ```
//!
//! maps to `{"17": true, "a3f": true}`.

pub mod file;

pub use file::FileFetcher;

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Raw response from a [`Fetch`] transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl FetchResponse {
    /// Response with the given status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to produce a collection index.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport answered with a non-2xx status.
    #[error("{url} returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code received.
        status: u16,
    },

    /// The body is not valid JSON.
    #[error("{url} returned malformed JSON: {source}")]
    Malformed {
        /// Requested URL.
        url: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The document has no `collection` array.
    #[error("{url} returned no collection array")]
    MissingCollection {
        /// Requested URL.
        url: String,
    },

    /// No transport handles this URL.
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// Reading a local resource failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Local path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Minimal GET transport.
pub trait Fetch {
    /// Fetch `url`.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response could be produced at all.
    /// A non-2xx status is a successful `FetchResponse`.
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// Fetch `url` and map each element id of its `collection` to `true`.
///
/// An empty `collection` yields an empty map. Numeric ids are stringified. Elements without a string or numeric `id`
/// are skipped.
///
/// # Errors
///
/// - [`FetchError::Status`] for a non-2xx response
/// - [`FetchError::Malformed`] when the body is not JSON
/// - [`FetchError::MissingCollection`] when `collection` is absent or not
///   an array
/// - whatever the transport itself returns
pub fn fetch_to_object<F: Fetch + ?Sized>(
    fetcher: &F,
    url: &str,
) -> Result<HashMap<String, bool>, FetchError> {
    let response = fetcher.get(url)?;
    if !response.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }

    let json: Value =
        serde_json::from_str(&response.body).map_err(|source| FetchError::Malformed {
            url: url.to_string(),
            source,
        })?;

    let collection = json
        .get("collection")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::MissingCollection {
            url: url.to_string(),
        })?;

    let index = collection
        .iter()
        .filter_map(|element| {
            let id = element_id(element);
            if id.is_none() {
                debug!(url, ?element, "Collection element without usable id");
            }
            id
        })
        .map(|id| (id, true))
        .collect::<HashMap<_, _>>();

    debug!(url, count = index.len(), "Collection index built");
    Ok(index)
}

fn element_id(element: &Value) -> Option<String> {
    match element.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
