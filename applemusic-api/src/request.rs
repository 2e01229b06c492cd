//! Outbound request representation.

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::HeaderMap;
use url::Url;

/// A fully resolved API request.
///
/// Built by [`Client::request`](crate::Client::request) and
/// [`Client::request_with_body`](crate::Client::request_with_body).
/// Transports receive it by reference and must clone before adding headers,
/// so one value can be sent any number of times, from any number of tasks.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// JSON payload, newline terminated.
    pub body: Option<Bytes>,
}
