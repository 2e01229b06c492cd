//! HTTP client for the Apple Music API.
//!
//! A call goes through three steps:
//!
//! 1. [`add_options`](crate::add_options) merges [`Options`] into the path's query
//! 2. [`Client::request`] / [`Client::request_with_body`] resolve the path
//!    against the base URL and attach `Content-Type` / `User-Agent`
//! 3. [`Client::execute`] sends through the configured [`Transport`]
//!    (normally an [`AuthTransport`]) and routes the body to a [`Target`] or,
//!    for non-2xx statuses, to [`classify`](crate::error::classify)
//!
//! [`Client::get`] and [`Client::post`] chain all three for JSON endpoints.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{Span, debug, instrument};
use url::Url;

use crate::context::Context;
use crate::error::{Error, Result, classify};
use crate::options::{Options, add_options};
use crate::request::Request;
use crate::response::{Json, Response, Target};
use crate::transport::{AuthTransport, Transport};

pub const DEFAULT_BASE_URL: &str = "https://api.music.apple.com/";
pub const DEFAULT_USER_AGENT: &str = concat!("applemusic-api/", env!("CARGO_PKG_VERSION"));

/// Async client for the Apple Music API.
///
/// Cheap to clone; clones share the transport. Configuration is fixed once
/// built.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    base_url: Url,
    user_agent: Option<HeaderValue>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    base_url: String,
    user_agent: String,
    developer_token: Option<String>,
    user_token: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            developer_token: None,
            user_token: None,
            transport: None,
        }
    }
}

impl ClientBuilder {
    /// Override the API endpoint (mock servers, proxies).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the `User-Agent` header. An empty string omits the header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Authenticate every request with this developer token.
    pub fn developer_token(mut self, token: impl Into<String>) -> Self {
        self.developer_token = Some(token.into());
        self
    }

    /// Also send this `Music-User-Token`. Needs a developer token.
    pub fn user_token(mut self, token: impl Into<String>) -> Self {
        self.user_token = Some(token.into());
        self
    }

    /// Send through `transport` instead of a default `reqwest::Client`.
    ///
    /// If a developer token is also configured, `transport` is wrapped in an
    /// [`AuthTransport`].
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> Result<Client> {
        let mut base_url = Url::parse(&self.base_url).map_err(|source| Error::MalformedPath {
            path: self.base_url.clone(),
            source,
        })?;
        // Relative paths resolve under the base path, not beside it.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let user_agent = if self.user_agent.is_empty() {
            None
        } else {
            Some(HeaderValue::from_str(&self.user_agent)?)
        };

        let inner: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(reqwest::Client::builder().build()?),
        };
        let transport: Arc<dyn Transport> = match self.developer_token {
            Some(token) => {
                let mut auth = AuthTransport::wrap(inner, token);
                if let Some(user_token) = self.user_token {
                    auth = auth.with_user_token(user_token);
                }
                Arc::new(auth)
            }
            None => inner,
        };

        Ok(Client {
            transport,
            base_url,
            user_agent,
        })
    }
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Unauthenticated client on the default endpoint, sending through
    /// `transport`. Pass an [`AuthTransport`] to authenticate.
    pub fn new(transport: impl Transport + 'static) -> Result<Self> {
        Self::builder().transport(transport).build()
    }

    /// Client authenticated with a developer token on the default endpoint.
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        Self::builder().developer_token(token).build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Configured user agent, empty if none is sent.
    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_ref()
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// Build a body-less request. Relative paths resolve against the base URL.
    pub fn request(&self, method: Method, path: &str) -> Result<Request> {
        self.build_request(method, path, None)
    }

    /// Build a request with `body` encoded as JSON plus a trailing newline.
    pub fn request_with_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Request> {
        let mut buf = serde_json::to_vec(body).map_err(Error::Encoding)?;
        buf.push(b'\n');
        self.build_request(method, path, Some(Bytes::from(buf)))
    }

    fn build_request(&self, method: Method, path: &str, body: Option<Bytes>) -> Result<Request> {
        let url = self
            .base_url
            .join(path)
            .map_err(|source| Error::MalformedPath {
                path: path.to_owned(),
                source,
            })?;

        let mut headers = HeaderMap::new();
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(ua) = &self.user_agent {
            headers.insert(USER_AGENT, ua.clone());
        }

        Ok(Request {
            method,
            url,
            headers,
            body,
        })
    }

    /// Send `request` and hand a successful body to `target`.
    ///
    /// - non-2xx → classified [`Error`] carrying the response headers,
    ///   `target` untouched; also when the error body cannot be read
    /// - 2xx with an empty body → `Ok`, `target` untouched
    /// - `ctx` done before completion → [`Error::Cancelled`] /
    ///   [`Error::DeadlineExceeded`], also when the transport failed because
    ///   of it
    ///
    /// The response body is consumed within the call, so the connection is
    /// released on every path.
    #[instrument(
        name = "applemusic_request",
        skip_all,
        fields(
            http.method = %request.method,
            http.url = %request.url,
            http.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute<D: Target + ?Sized>(
        &self,
        ctx: &Context,
        request: &Request,
        target: &mut D,
    ) -> Result<Response> {
        tokio::select! {
            biased;
            () = ctx.done() => Err(ctx.error().unwrap_or(Error::Cancelled)),
            res = self.round_trip(ctx, request, target) => res,
        }
    }

    async fn round_trip<D: Target + ?Sized>(
        &self,
        ctx: &Context,
        request: &Request,
        target: &mut D,
    ) -> Result<Response> {
        let resp = match self.transport.send(request).await {
            Ok(resp) => resp,
            Err(e) => return Err(ctx.error().unwrap_or(e)),
        };

        let status = resp.status();
        Span::current().record("http.status_code", status.as_u16());
        let meta = Response {
            status,
            headers: resp.headers().clone(),
            url: resp.url().clone(),
        };

        if !status.is_success() {
            // A body that cannot be read only costs the error its detail.
            let body = match resp.bytes().await {
                Ok(body) => body,
                Err(e) => {
                    if let Some(err) = ctx.error() {
                        return Err(err);
                    }
                    debug!(error = %e, "failed to read error body");
                    Bytes::new()
                }
            };
            return Err(classify(request, status, &meta.headers, &body));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ctx.error().unwrap_or(Error::Transport(e)))?;
        debug!(bytes = body.len(), "response received");
        target.fill(&body)?;
        Ok(meta)
    }

    /// GET `path` with `options` and decode the JSON response.
    pub async fn get<T>(&self, ctx: &Context, path: &str, options: Option<&Options>) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = add_options(path, options)?;
        let request = self.request(Method::GET, &path)?;
        let mut out = T::default();
        self.execute(ctx, &request, &mut Json(&mut out)).await?;
        Ok(out)
    }

    /// POST `body` as JSON to `path` and decode the JSON response.
    pub async fn post<B, T>(&self, ctx: &Context, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let request = self.request_with_body(Method::POST, path, body)?;
        let mut out = T::default();
        self.execute(ctx, &request, &mut Json(&mut out)).await?;
        Ok(out)
    }
}
