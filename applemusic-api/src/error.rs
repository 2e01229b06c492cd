//! Error types for the Apple Music API client.
//!
//! Non-2xx responses are classified by [`classify`] into one of three kinds,
//! each carrying the originating request's method and URL plus the status
//! and headers of the response:
//!
//! | Status | Variant                    | Body handling                           |
//! |--------|----------------------------|-----------------------------------------|
//! | 401    | [`Error::Unauthorized`]    | read as plain text                      |
//! | 429    | [`Error::RateLimited`]     | `{"message": ...}`, best effort         |
//! | other  | [`Error::Api`]             | `{"errors": [...]}`, best effort        |
//!
//! A body that fails to decode only loses detail: the classified error is
//! still returned, with an empty message or error list.

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::request::Request;

/// Errors that can occur when interacting with the Apple Music API.
#[derive(Debug, Error)]
pub enum Error {
    /// A path or URL could not be parsed.
    #[error("malformed path {path:?}: {source}")]
    MalformedPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// The request body could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// 401: the developer or user token is invalid or expired.
    #[error("{method} {url}: {status} {message}")]
    Unauthorized {
        method: Method,
        url: Url,
        status: StatusCode,
        headers: HeaderMap,
        message: String,
    },

    /// 429: the caller should back off before retrying.
    #[error("{method} {url}: {status} {message}")]
    RateLimited {
        method: Method,
        url: Url,
        status: StatusCode,
        headers: HeaderMap,
        message: String,
    },

    /// Any other non-2xx response, with the API's error objects.
    #[error("{method} {url}: {status} {errors:?}")]
    Api {
        method: Method,
        url: Url,
        status: StatusCode,
        headers: HeaderMap,
        errors: Vec<ErrorObject>,
    },

    /// HTTP transport error (connection refused, TLS failure, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The call's [`Context`](crate::Context) was cancelled.
    #[error("context canceled")]
    Cancelled,

    /// The call's [`Context`](crate::Context) deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// A successful response body was not valid JSON for the target type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Writing a raw response body to its sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A credential or user agent is not a legal header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl Error {
    /// HTTP status of a classified API error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { status, .. }
            | Self::RateLimited { status, .. }
            | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response headers of a classified API error (`Retry-After`, ...).
    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            Self::Unauthorized { headers, .. }
            | Self::RateLimited { headers, .. }
            | Self::Api { headers, .. } => Some(headers),
            _ => None,
        }
    }
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Source of an API error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorSource {
    /// Query parameter that caused the error.
    pub parameter: String,
    /// JSON pointer into the request document.
    pub pointer: Option<Value>,
}

/// One entry of the `errors` array in an API error response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorObject {
    pub id: String,
    pub about: String,
    pub status: String,
    pub code: String,
    pub title: String,
    pub detail: String,
    pub source: ErrorSource,
    pub meta: Option<Value>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorObject>,
}

#[derive(Deserialize)]
struct RateLimitEnvelope {
    #[serde(default)]
    message: String,
}

/// Classify a non-2xx response.
///
/// Never fails: decoding problems degrade the detail of the returned error,
/// not its kind. An empty 401 body falls back to the status reason phrase.
pub fn classify(
    request: &Request,
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
) -> Error {
    let method = request.method.clone();
    let url = request.url.clone();
    let headers = headers.clone();
    match status {
        StatusCode::UNAUTHORIZED => {
            let text = String::from_utf8_lossy(body);
            let message = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or_default().to_owned()
            } else {
                text.into_owned()
            };
            Error::Unauthorized {
                method,
                url,
                status,
                headers,
                message,
            }
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let message = serde_json::from_slice::<RateLimitEnvelope>(body)
                .map(|e| e.message)
                .unwrap_or_default();
            Error::RateLimited {
                method,
                url,
                status,
                headers,
                message,
            }
        }
        _ => {
            let errors = serde_json::from_slice::<ErrorEnvelope>(body)
                .map(|e| e.errors)
                .unwrap_or_default();
            Error::Api {
                method,
                url,
                status,
                headers,
                errors,
            }
        }
    }
}
