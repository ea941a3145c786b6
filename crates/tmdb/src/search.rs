use crate::{
    models::{PaginatedResponse, SearchedCollection},
    TmdbClient,
};

impl TmdbClient {
    /// Search collections by name
    /// GET /search/collection?query={query}&page={page}
    pub async fn search_collections(
        &self,
        query: &str,
        page: u32,
    ) -> crate::Result<PaginatedResponse<SearchedCollection>> {
        let page = page.to_string();
        let response = self
            .get("/search/collection")
            .query(&[("query", query), ("page", page.as_str())])
            .send()
            .await?;
        self.handle_response(response).await
    }
}
