//! Query parameters shared by most endpoints.
//!
//! | Field      | Query key | Example                |
//! |------------|-----------|------------------------|
//! | `language` | `l`       | `l=en-us`              |
//! | `include`  | `include` | `include=artists,tracks` |
//! | `limit`    | `limit`   | `limit=25`             |
//! | `offset`   | `offset`  | `offset=50`            |
//!
//! Empty strings, empty lists and zero values are never sent.

use std::sync::LazyLock;

use url::{Url, form_urlencoded};

use crate::error::{Error, Result};

// Only used to validate relative references.
static REFERENCE_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost/").expect("valid reference base"));

/// Localization, relationship and pagination options for a fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Language tag, e.g. `en-us`. The API defaults to the storefront's
    /// default language.
    pub language: Option<String>,
    /// Additional relationships to include in the fetch.
    pub include: Vec<String>,
    /// Number of objects to return.
    pub limit: Option<u32>,
    /// Offset of the next page of objects.
    pub offset: Option<u32>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, tag: impl Into<String>) -> Self {
        self.language = Some(tag.into());
        self
    }

    pub fn include(mut self, relationship: impl Into<String>) -> Self {
        self.include.push(relationship.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Non-empty fields as `(key, value)` pairs, in field order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(l) = self.language.as_deref().filter(|l| !l.is_empty()) {
            pairs.push(("l", l.to_owned()));
        }
        let include: Vec<&str> = self
            .include
            .iter()
            .map(String::as_str)
            .filter(|r| !r.is_empty())
            .collect();
        if !include.is_empty() {
            pairs.push(("include", include.join(",")));
        }
        if let Some(limit) = self.limit.filter(|&n| n > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset.filter(|&n| n > 0) {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

/// Append the parameters in `options` to the query string of `path`.
///
/// `path` may be relative (`v1/storefronts?ids=us`) or absolute. The existing
/// query is kept verbatim, ahead of the new parameters; a key present in
/// both is sent twice. `None` or an all-empty `options` returns `path`
/// unchanged.
pub fn add_options(path: &str, options: Option<&Options>) -> Result<String> {
    let Some(options) = options else {
        return Ok(path.to_owned());
    };
    REFERENCE_BASE
        .join(path)
        .map_err(|source| Error::MalformedPath {
            path: path.to_owned(),
            source,
        })?;

    let pairs = options.query_pairs();
    if pairs.is_empty() {
        return Ok(path.to_owned());
    }

    let (rest, fragment) = match path.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (path, None),
    };
    let (base, query) = match rest.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (rest, None),
    };

    let added = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    let mut out = match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("{base}?{query}&{added}"),
        None => format!("{base}?{added}"),
    };
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_of(path: &str) -> Vec<(String, String)> {
        let url = REFERENCE_BASE.join(path).unwrap();
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn none_leaves_path_untouched() {
        assert_eq!(add_options("v1/storefronts", None).unwrap(), "v1/storefronts");
    }

    #[test]
    fn empty_fields_leave_path_untouched() {
        let opts = Options {
            language: Some(String::new()),
            include: vec![String::new()],
            limit: Some(0),
            offset: None,
        };
        for path in ["v1/storefronts", "v1/storefronts?ids=us,jp", "/"] {
            assert_eq!(add_options(path, Some(&opts)).unwrap(), path);
        }
    }

    #[test]
    fn only_non_empty_fields_are_encoded() {
        let opts = Options::new().language("en-us").limit(10);
        let out = add_options("v1/storefronts", Some(&opts)).unwrap();
        assert_eq!(out, "v1/storefronts?l=en-us&limit=10");
    }

    #[test]
    fn include_list_is_comma_joined() {
        let opts = Options::new().include("artists").include("tracks");
        let out = add_options("v1/catalog/us/albums/1", Some(&opts)).unwrap();
        assert_eq!(
            query_of(&out),
            vec![("include".into(), "artists,tracks".into())]
        );
    }

    #[test]
    fn existing_query_is_kept() {
        let opts = Options::new().offset(20).language("ja");
        let out = add_options("v1/storefronts?ids=us,jp", Some(&opts)).unwrap();
        assert_eq!(
            query_of(&out),
            vec![
                ("ids".into(), "us,jp".into()),
                ("l".into(), "ja".into()),
                ("offset".into(), "20".into()),
            ]
        );
    }

    #[test]
    fn existing_query_text_is_not_reencoded() {
        let opts = Options::new().limit(3);
        let out = add_options("v1/storefronts?ids=us,jp", Some(&opts)).unwrap();
        assert_eq!(out, "v1/storefronts?ids=us,jp&limit=3");
        let out = add_options("v1/storefronts?", Some(&opts)).unwrap();
        assert_eq!(out, "v1/storefronts?limit=3");
    }

    #[test]
    fn duplicate_keys_are_appended_not_replaced() {
        let opts = Options::new().limit(5);
        let out = add_options("v1/me/library/songs?limit=1", Some(&opts)).unwrap();
        assert_eq!(
            query_of(&out),
            vec![("limit".into(), "1".into()), ("limit".into(), "5".into())]
        );
    }

    #[test]
    fn fragment_is_preserved() {
        let opts = Options::new().limit(1);
        let out = add_options("v1/storefronts#top", Some(&opts)).unwrap();
        assert_eq!(out, "v1/storefronts?limit=1#top");
    }

    #[test]
    fn absolute_urls_are_supported() {
        let opts = Options::new().limit(2);
        let out = add_options("https://api.music.apple.com/v1/storefronts", Some(&opts)).unwrap();
        assert_eq!(out, "https://api.music.apple.com/v1/storefronts?limit=2");
    }

    #[test]
    fn malformed_path_is_rejected() {
        for opts in [Options::new(), Options::new().limit(2)] {
            let err = add_options("http://[::1", Some(&opts)).unwrap_err();
            assert!(matches!(err, Error::MalformedPath { .. }));
        }
    }
}
