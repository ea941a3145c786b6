use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectionsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize collection store: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("TMDB error: {0}")]
    Tmdb(#[from] tmdb::TmdbError),

    #[error("No TMDB API key configured (set TMDB_API_KEY or `api_key` in the config file)")]
    MissingApiKey,
}
