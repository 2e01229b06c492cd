//! Storefront APIs.
//!
//! A storefront is an iTunes Store territory that content is available in.
//!
//! | Method                              | Endpoint                      |
//! |-------------------------------------|-------------------------------|
//! | [`Client::storefront`]              | `GET /v1/storefronts/{id}`    |
//! | [`Client::storefronts_by_ids`]      | `GET /v1/storefronts?ids=...` |
//! | [`Client::all_storefronts`]         | `GET /v1/storefronts`         |
//! | [`Client::me_storefront`]           | `GET /v1/me/storefront`       |
//!
//! Response:
//! ```json
//! {
//!   "data": [{
//!     "id": "us",
//!     "type": "storefronts",
//!     "href": "/v1/storefronts/us",
//!     "attributes": {
//!       "defaultLanguageTag": "en-us",
//!       "name": "United States",
//!       "supportedLanguageTags": ["en-us", "es-mx"]
//!     }
//!   }]
//! }
//! ```
//!
//! `me_storefront` needs a user token.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::context::Context;
use crate::error::Result;
use crate::options::Options;
use crate::resource::{ResourceKind, ResourceObject};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorefrontAttributes {
    pub default_language_tag: String,
    pub name: String,
    pub supported_language_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storefront {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub href: String,
    pub attributes: StorefrontAttributes,
}

impl ResourceObject for Storefront {
    fn id(&self) -> &str {
        &self.id
    }

    fn href(&self) -> Option<&str> {
        Some(self.href.as_str()).filter(|h| !h.is_empty())
    }

    fn kind(&self) -> Option<ResourceKind> {
        Some(ResourceKind::Storefronts)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Storefronts {
    #[serde(default)]
    pub data: Vec<Storefront>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl Client {
    /// Fetch a single storefront by its identifier (e.g. `us`).
    pub async fn storefront(
        &self,
        ctx: &Context,
        id: &str,
        options: Option<&Options>,
    ) -> Result<Storefronts> {
        let path = format!("v1/storefronts/{}", urlencoding::encode(id));
        self.get(ctx, &path, options).await
    }

    /// Fetch several storefronts in one call.
    pub async fn storefronts_by_ids(
        &self,
        ctx: &Context,
        ids: &[&str],
        options: Option<&Options>,
    ) -> Result<Storefronts> {
        let ids: Vec<_> = ids.iter().map(|id| urlencoding::encode(id)).collect();
        let path = format!("v1/storefronts?ids={}", ids.join(","));
        self.get(ctx, &path, options).await
    }

    /// Fetch every storefront, in alphabetical order. Use `limit`/`offset`
    /// to page.
    pub async fn all_storefronts(
        &self,
        ctx: &Context,
        options: Option<&Options>,
    ) -> Result<Storefronts> {
        self.get(ctx, "v1/storefronts", options).await
    }

    /// Fetch the storefront of the user behind the `Music-User-Token`.
    pub async fn me_storefront(
        &self,
        ctx: &Context,
        options: Option<&Options>,
    ) -> Result<Storefronts> {
        self.get(ctx, "v1/me/storefront", options).await
    }
}
