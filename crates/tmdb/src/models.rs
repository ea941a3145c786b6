use serde::{Deserialize, Serialize};

/// A franchise grouping of films, as returned by `GET /collection/{id}`.
///
/// Only the fields kept in the local store are modelled; anything else TMDB
/// sends at the top level is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub parts: Vec<CollectionPart>,
}

/// One film inside a collection.
///
/// The record is treated as opaque: `id` is lifted out for lookups and every
/// other field round-trips through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CollectionPart {
    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(|v| v.as_str())
    }
}

/// Entry of `GET /search/collection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchedCollection {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub page: i64,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub total_results: i64,
}
