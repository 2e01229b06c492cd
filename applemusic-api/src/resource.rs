//! Polymorphic resource decoding.
//!
//! Some endpoints (search, recently played, heavy rotation) return a `data`
//! array mixing resource types. Every element carries a `type` tag; the tag
//! is read first and selects the variant the object is decoded into.
//!
//! ```json
//! { "data": [
//!     { "id": "1", "type": "albums", "href": "/v1/catalog/us/albums/1", "attributes": { ... } },
//!     { "id": "p.x", "type": "library-playlists", "attributes": { ... } }
//! ] }
//! ```
//!
//! Tags this crate does not know decode to [`Resource::Unknown`] instead of
//! failing the whole page.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::storefront::Storefront;

/// The resource types the API tags objects with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Activities,
    Albums,
    AppleCurators,
    Artists,
    Curators,
    Genres,
    MusicVideos,
    Playlists,
    Songs,
    Stations,
    LibraryAlbums,
    LibraryArtists,
    LibraryMusicVideos,
    LibraryPlaylists,
    LibrarySongs,
    Storefronts,
}

impl ResourceKind {
    const ALL: [Self; 16] = [
        Self::Activities,
        Self::Albums,
        Self::AppleCurators,
        Self::Artists,
        Self::Curators,
        Self::Genres,
        Self::MusicVideos,
        Self::Playlists,
        Self::Songs,
        Self::Stations,
        Self::LibraryAlbums,
        Self::LibraryArtists,
        Self::LibraryMusicVideos,
        Self::LibraryPlaylists,
        Self::LibrarySongs,
        Self::Storefronts,
    ];

    /// The `type` tag used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activities => "activities",
            Self::Albums => "albums",
            Self::AppleCurators => "apple-curators",
            Self::Artists => "artists",
            Self::Curators => "curators",
            Self::Genres => "genres",
            Self::MusicVideos => "music-videos",
            Self::Playlists => "playlists",
            Self::Songs => "songs",
            Self::Stations => "stations",
            Self::LibraryAlbums => "library-albums",
            Self::LibraryArtists => "library-artists",
            Self::LibraryMusicVideos => "library-music-videos",
            Self::LibraryPlaylists => "library-playlists",
            Self::LibrarySongs => "library-songs",
            Self::Storefronts => "storefronts",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == tag)
    }

    /// Whether the resource lives in the user's iCloud Music Library.
    pub fn is_library(self) -> bool {
        self.as_str().starts_with("library-")
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities shared by every decoded resource.
pub trait ResourceObject {
    fn id(&self) -> &str;
    fn href(&self) -> Option<&str>;
    fn kind(&self) -> Option<ResourceKind>;
}

/// A resource whose attributes are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Map<String, Value>>,
}

/// One element of a mixed `data` array.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// A catalog resource (`albums`, `songs`, ...).
    Catalog { kind: ResourceKind, object: Object },
    /// An iCloud Music Library resource (`library-songs`, ...).
    Library { kind: ResourceKind, object: Object },
    Storefront(Storefront),
    /// A tag this crate does not know; the raw object is kept.
    Unknown { tag: String, value: Value },
}

impl Resource {
    /// Decode `value`, choosing the variant from its `type` tag.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| <serde_json::Error as de::Error>::missing_field("type"))?
            .to_owned();

        let Some(kind) = ResourceKind::from_tag(&tag) else {
            return Ok(Self::Unknown { tag, value });
        };
        Ok(match kind {
            ResourceKind::Storefronts => Self::Storefront(serde_json::from_value(value)?),
            k if k.is_library() => Self::Library {
                kind,
                object: serde_json::from_value(value)?,
            },
            _ => Self::Catalog {
                kind,
                object: serde_json::from_value(value)?,
            },
        })
    }
}

impl ResourceObject for Resource {
    fn id(&self) -> &str {
        match self {
            Self::Catalog { object, .. } | Self::Library { object, .. } => &object.id,
            Self::Storefront(s) => &s.id,
            Self::Unknown { value, .. } => value.get("id").and_then(Value::as_str).unwrap_or(""),
        }
    }

    fn href(&self) -> Option<&str> {
        match self {
            Self::Catalog { object, .. } | Self::Library { object, .. } => object.href.as_deref(),
            Self::Storefront(s) => s.href(),
            Self::Unknown { value, .. } => value.get("href").and_then(Value::as_str),
        }
    }

    fn kind(&self) -> Option<ResourceKind> {
        match self {
            Self::Catalog { kind, .. } | Self::Library { kind, .. } => Some(*kind),
            Self::Storefront(_) => Some(ResourceKind::Storefronts),
            Self::Unknown { .. } => None,
        }
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

/// A page of mixed resources.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub data: Vec<Resource>,
    /// Relative path of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tags_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(ResourceKind::from_tag("podcasts"), None);
    }

    #[test]
    fn mixed_page_decodes_by_tag() {
        let page: ResourceList = serde_json::from_value(json!({
            "data": [
                {"id": "1", "type": "albums", "href": "/v1/catalog/us/albums/1",
                 "attributes": {"name": "Album"}},
                {"id": "i.abc", "type": "library-songs", "attributes": {"name": "Song"}},
                {"id": "us", "type": "storefronts", "href": "/v1/storefronts/us",
                 "attributes": {"defaultLanguageTag": "en-us", "name": "United States",
                                "supportedLanguageTags": ["en-us", "es-mx"]}},
                {"id": "x", "type": "podcasts"}
            ],
            "next": "/v1/me/recent/played?offset=4"
        }))
        .unwrap();

        assert_eq!(page.data.len(), 4);
        assert_eq!(page.next.as_deref(), Some("/v1/me/recent/played?offset=4"));

        let Resource::Catalog { kind, object } = &page.data[0] else {
            panic!("expected catalog resource");
        };
        assert_eq!(*kind, ResourceKind::Albums);
        assert_eq!(object.attributes["name"], "Album");

        assert!(matches!(
            &page.data[1],
            Resource::Library { kind: ResourceKind::LibrarySongs, .. }
        ));
        let Resource::Storefront(sf) = &page.data[2] else {
            panic!("expected storefront");
        };
        assert_eq!(sf.attributes.default_language_tag, "en-us");

        assert!(matches!(&page.data[3], Resource::Unknown { tag, .. } if tag == "podcasts"));
    }

    #[test]
    fn capabilities_cover_every_variant() {
        let items: Vec<Resource> = serde_json::from_value(json!([
            {"id": "1", "type": "songs", "href": "/v1/catalog/us/songs/1"},
            {"id": "us", "type": "storefronts", "href": "/v1/storefronts/us"},
            {"id": "z", "type": "uploaded-videos", "href": "/v1/z"}
        ]))
        .unwrap();
        let ids: Vec<&str> = items.iter().map(ResourceObject::id).collect();
        assert_eq!(ids, ["1", "us", "z"]);
        assert_eq!(items[1].href(), Some("/v1/storefronts/us"));
        assert_eq!(items[0].kind(), Some(ResourceKind::Songs));
        assert_eq!(items[2].kind(), None);
    }

    #[test]
    fn missing_tag_is_an_error() {
        let res: Result<Resource, _> = serde_json::from_value(json!({"id": "1"}));
        assert!(res.is_err());
    }
}
