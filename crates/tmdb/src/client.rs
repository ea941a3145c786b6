use reqwest::Client;

use crate::error::TmdbError;

pub const BASE_URL: &str = "https://api.themoviedb.org/3";

pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    pub(crate) language: Option<String>,
}

impl TmdbClient {
    /// Create a TmdbClient against the public TMDB API.
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, BASE_URL)
    }

    /// Create a TmdbClient against a custom base URL (mirrors, test servers).
    pub fn with_base_url(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            language: None,
        }
    }

    /// Request localized fields (e.g. `en-US`). TMDB falls back to its
    /// default language when unset.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a GET request with the credential and language already attached.
    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())]);
        if let Some(language) = &self.language {
            request = request.query(&[("language", language.as_str())]);
        }
        request
    }

    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TmdbError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| TmdbError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}
