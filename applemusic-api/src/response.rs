//! Response metadata and decode targets.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// Metadata of a completed API response. The body has already been consumed
/// by the call's [`Target`].
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Final URL, after redirects.
    pub url: Url,
}

/// Destination for a successful (2xx) response body.
pub trait Target {
    fn fill(&mut self, body: &[u8]) -> Result<()>;
}

/// Discards the body.
impl Target for () {
    fn fill(&mut self, _body: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// Decodes the body as JSON into `T`.
///
/// An empty body is not an error: the target is left as it was.
#[derive(Debug)]
pub struct Json<'a, T>(pub &'a mut T);

impl<T: DeserializeOwned> Target for Json<'_, T> {
    fn fill(&mut self, body: &[u8]) -> Result<()> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        *self.0 = serde_json::from_slice(body).map_err(Error::Decode)?;
        Ok(())
    }
}

/// Copies the body verbatim into a writer.
#[derive(Debug)]
pub struct Raw<'a, W>(pub &'a mut W);

impl<W: std::io::Write> Target for Raw<'_, W> {
    fn fill(&mut self, body: &[u8]) -> Result<()> {
        self.0.write_all(body)?;
        Ok(())
    }
}
