//! Injectable transport layer and the authenticating wrapper.
//!
//! [`Transport`] is the seam between request construction and the network.
//! `reqwest::Client` implements it directly; [`AuthTransport`] wraps any
//! other transport and adds the Apple Music credentials:
//!
//! - `Authorization: Bearer <developer token>` on every request
//! - `Music-User-Token: <user token>` when a user token is configured
//!
//! Neither performs retries.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};

use crate::error::Result;
use crate::request::Request;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Header carrying the per-user token for `v1/me` endpoints.
pub const MUSIC_USER_TOKEN: HeaderName = HeaderName::from_static("music-user-token");

/// Sends a [`Request`] and returns the raw response.
///
/// Implementations must not mutate `request`; add headers to a clone.
pub trait Transport: Send + Sync {
    fn send<'a>(&'a self, request: &'a Request) -> BoxFuture<'a, Result<reqwest::Response>>;
}

impl Transport for reqwest::Client {
    fn send<'a>(&'a self, request: &'a Request) -> BoxFuture<'a, Result<reqwest::Response>> {
        let mut builder = self
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        Box::pin(async move { Ok(builder.send().await?) })
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send<'a>(&'a self, request: &'a Request) -> BoxFuture<'a, Result<reqwest::Response>> {
        (**self).send(request)
    }
}

/// Transport that authenticates every request with a developer token and,
/// optionally, a user token.
#[derive(Clone)]
pub struct AuthTransport<T = reqwest::Client> {
    token: String,
    user_token: Option<String>,
    inner: T,
}

impl AuthTransport {
    /// Authenticate with `token` over a default `reqwest::Client`.
    pub fn new(token: impl Into<String>) -> Self {
        Self::wrap(reqwest::Client::new(), token)
    }
}

impl<T> AuthTransport<T> {
    /// Authenticate with `token` over `inner`.
    pub fn wrap(inner: T, token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_token: None,
            inner,
        }
    }

    #[must_use]
    pub fn with_user_token(mut self, user_token: impl Into<String>) -> Self {
        self.user_token = Some(user_token.into());
        self
    }

    /// Replace the underlying transport.
    pub fn with_transport<U>(self, inner: U) -> AuthTransport<U> {
        AuthTransport {
            token: self.token,
            user_token: self.user_token,
            inner,
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.inner
    }

    /// Copy `request` and add the credential headers to the copy.
    pub fn authorize(&self, request: &Request) -> Result<Request> {
        let mut req = request.clone();

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", self.token))?;
        bearer.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, bearer);

        if let Some(user_token) = &self.user_token {
            let mut value = HeaderValue::from_str(user_token)?;
            value.set_sensitive(true);
            req.headers.insert(MUSIC_USER_TOKEN, value);
        }
        Ok(req)
    }
}

impl<T> std::fmt::Debug for AuthTransport<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTransport")
            .field("token", &"<redacted>")
            .field("user_token", &self.user_token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Transport for AuthTransport<T> {
    fn send<'a>(&'a self, request: &'a Request) -> BoxFuture<'a, Result<reqwest::Response>> {
        Box::pin(async move {
            let req = self.authorize(request)?;
            self.inner.send(&req).await
        })
    }
}
