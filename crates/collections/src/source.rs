//! Where collection data comes from

use async_trait::async_trait;
use tmdb::{Collection, SearchedCollection, TmdbClient};

use crate::CollectionsError;

/// Read side of the metadata provider.
///
/// Non-success answers from the provider are not errors here: `search`
/// yields no candidates and `detail` yields `None`. Only transport and
/// decoding failures come back as `Err`.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchedCollection>, CollectionsError>;

    async fn detail(&self, id: i64) -> Result<Option<Collection>, CollectionsError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

pub struct TmdbSource {
    client: TmdbClient,
}

impl TmdbSource {
    pub fn new(client: TmdbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CollectionSource for TmdbSource {
    async fn search(&self, query: &str) -> Result<Vec<SearchedCollection>, CollectionsError> {
        match self.client.search_collections(query, 1).await {
            Ok(response) => Ok(response.results),
            Err(e) if e.is_api() => {
                tracing::warn!("Search for '{}' failed: {}", query, e);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn detail(&self, id: i64) -> Result<Option<Collection>, CollectionsError> {
        match self.client.get_collection(id).await {
            Ok(collection) => Ok(Some(collection)),
            Err(e) if e.is_api() => {
                tracing::warn!(
                    "Error getting collection {}: {}",
                    id,
                    e.status_code().unwrap_or_default()
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> TmdbSource {
        TmdbSource::new(TmdbClient::with_base_url(
            reqwest::Client::new(),
            "test-key",
            server.uri(),
        ))
    }

    #[tokio::test]
    async fn test_search_non_success_is_empty() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/collection"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&mock_server)
            .await;

        let results = source_for(&mock_server).search("Star Wars").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_detail_non_success_is_none() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collection/42"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let detail = source_for(&mock_server).detail(42).await.unwrap();
        assert!(detail.is_none());
    }

    #[tokio::test]
    async fn test_detail_undecodable_body_is_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collection/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
            .mount(&mock_server)
            .await;

        let err = source_for(&mock_server).detail(42).await.unwrap_err();
        assert!(matches!(err, CollectionsError::Tmdb(tmdb::TmdbError::Json { .. })));
    }
}
