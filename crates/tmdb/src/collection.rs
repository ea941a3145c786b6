use crate::{models::Collection, TmdbClient};

impl TmdbClient {
    /// Get full collection details by ID
    /// GET /collection/{collection_id}
    pub async fn get_collection(&self, collection_id: i64) -> crate::Result<Collection> {
        let response = self
            .get(&format!("/collection/{}", collection_id))
            .send()
            .await?;
        self.handle_response(response).await
    }
}
