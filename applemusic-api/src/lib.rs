//! Apple Music API client library.
//!
//! Core plumbing for talking to `api.music.apple.com`: query option
//! encoding, request construction, developer/user token injection, response
//! decoding, error classification and per-call cancellation.
//!
//! # Authentication
//!
//! Every request carries a developer token (an ES256 JWT, see the
//! `applemusic-token` crate) as `Authorization: Bearer ...`. Endpoints under
//! `/v1/me` additionally need the user's `Music-User-Token`.
//!
//! ```no_run
//! use applemusic_api::{Client, Context, Options};
//!
//! # async fn run() -> applemusic_api::Result<()> {
//! let client = Client::builder()
//!     .developer_token("DEVELOPER_TOKEN")
//!     .user_token("MUSIC_USER_TOKEN")
//!     .build()?;
//!
//! let ctx = Context::with_timeout(std::time::Duration::from_secs(10));
//! let page = client
//!     .storefronts_by_ids(&ctx, &["us", "jp"], Some(&Options::new().language("en-us")))
//!     .await?;
//! println!("{:?}", page.data);
//! # Ok(())
//! # }
//! ```
//!
//! # Lower-level use
//!
//! [`Client::request`] builds a [`Request`] that can be inspected or sent
//! through any [`Transport`]; [`Client::execute`] sends it and routes the
//! body into a [`Target`] such as [`Json`] or [`Raw`]. A shared request is
//! never mutated: [`AuthTransport`] adds credentials to a copy.
//!
//! # API endpoint mapping
//!
//! | Method                           | Endpoint                      |
//! |----------------------------------|-------------------------------|
//! | [`Client::storefront`]           | `GET /v1/storefronts/{id}`    |
//! | [`Client::storefronts_by_ids`]   | `GET /v1/storefronts?ids=...` |
//! | [`Client::all_storefronts`]      | `GET /v1/storefronts`         |
//! | [`Client::me_storefront`]        | `GET /v1/me/storefront`       |

pub mod client;
pub mod context;
pub mod error;
mod options;
mod request;
pub mod resource;
mod response;
mod storefront;
pub mod transport;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use context::Context;
pub use error::{Error, ErrorObject, ErrorSource, Result, classify};
pub use options::{Options, add_options};
pub use request::Request;
pub use resource::{Resource, ResourceKind, ResourceList, ResourceObject};
pub use response::{Json, Raw, Response, Target};
pub use storefront::{Storefront, StorefrontAttributes, Storefronts};
pub use transport::{AuthTransport, MUSIC_USER_TOKEN, Transport};
