use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::CollectionsError;

pub const API_KEY_ENV: &str = "TMDB_API_KEY";
pub const DEFAULT_OUTPUT: &str = "data/collections.json";
pub const DEFAULT_CAP: usize = 100;
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 250;

const DEFAULT_FRANCHISES: &[&str] = &[
    "Star Wars",
    "Marvel",
    "Harry Potter",
    "James Bond",
    "Lord of the Rings",
    "Fast and Furious",
    "Batman",
    "Spider-Man",
    "X-Men",
    "Jurassic Park",
    "Mission: Impossible",
    "Terminator",
    "Alien",
    "Indiana Jones",
    "Matrix",
    "Transformers",
    "Pirates of the Caribbean",
    "Toy Story",
    "Ice Age",
    "Shrek",
    "The Hunger Games",
    "Twilight",
    "Avengers",
    "Iron Man",
    "Captain America",
    "Thor",
    "Guardians of the Galaxy",
    "Ant-Man",
    "Doctor Strange",
    "Black Panther",
    "Rocky",
    "Rambo",
    "Die Hard",
    "Bourne",
    "Ocean's",
    "Mad Max",
    "John Wick",
    "Planet of the Apes",
    "The Godfather",
    "Back to the Future",
    "Men in Black",
    "Ghostbusters",
    "Blade Runner",
    "Predator",
    "Halloween",
    "Friday the 13th",
    "Nightmare on Elm Street",
    "Final Destination",
    "Saw",
    "Resident Evil",
];

/// A collection that must be present under a known name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedCollection {
    pub id: i64,
    pub name: String,
}

impl PinnedCollection {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: Option<String>,
    pub output: PathBuf,
    /// Upper bound on collections gathered per discovery run
    pub cap: usize,
    pub request_delay_ms: u64,
    pub timeout_secs: u64,
    pub franchises: Vec<String>,
    /// Explicit ids walked when the franchise search leaves room under the cap
    pub fallback_ids: Vec<i64>,
    pub pinned: Vec<PinnedCollection>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: tmdb::BASE_URL.to_string(),
            language: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            cap: DEFAULT_CAP,
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            timeout_secs: 30,
            franchises: DEFAULT_FRANCHISES.iter().map(|s| s.to_string()).collect(),
            fallback_ids: [10, 84].into_iter().chain(86..=125).collect(),
            pinned: vec![
                PinnedCollection::new(1241, "Harry Potter Collection"),
                PinnedCollection::new(86311, "The Avengers Collection"),
                PinnedCollection::new(10, "Star Wars Collection"),
                PinnedCollection::new(119, "The Lord of the Rings Collection"),
            ],
        }
    }
}

impl DiscoveryConfig {
    /// Load config from a TOML file. Keys missing from the file keep their
    /// defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CollectionsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|source| CollectionsError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, CollectionsError> {
        match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                tracing::debug!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the credential. The environment wins over the file; blank
    /// values count as unset.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Result<String, CollectionsError> {
        let non_blank = |key: String| {
            let key = key.trim().to_string();
            (!key.is_empty()).then_some(key)
        };

        env_value
            .and_then(non_blank)
            .or_else(|| self.api_key.clone().and_then(non_blank))
            .ok_or(CollectionsError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.cap, 100);
        assert_eq!(config.request_delay(), Duration::from_millis(250));
        assert_eq!(config.output, PathBuf::from("data/collections.json"));
        assert_eq!(config.franchises.len(), 50);
        assert_eq!(config.franchises[0], "Star Wars");
        assert_eq!(config.fallback_ids.first(), Some(&10));
        assert_eq!(config.fallback_ids[1], 84);
        assert_eq!(config.fallback_ids[2], 86);
        assert_eq!(config.fallback_ids.last(), Some(&125));
        assert_eq!(config.fallback_ids.len(), 42);
        assert_eq!(config.pinned.len(), 4);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DiscoveryConfig::from_toml(
            r#"
            cap = 200
            franchises = ["Star Trek", "Paddington"]

            [[pinned]]
            id = 151
            name = "Star Trek: The Original Series Collection"
            "#,
        )
        .unwrap();

        assert_eq!(config.cap, 200);
        assert_eq!(config.franchises, vec!["Star Trek", "Paddington"]);
        assert_eq!(
            config.pinned,
            vec![PinnedCollection::new(
                151,
                "Star Trek: The Original Series Collection"
            )]
        );
        assert_eq!(config.request_delay_ms, 250);
        assert_eq!(config.base_url, tmdb::BASE_URL);
        assert_eq!(config.fallback_ids.len(), 42);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(DiscoveryConfig::from_toml("cap = \"lots\"").is_err());
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        let config = DiscoveryConfig::load(None).unwrap();
        assert_eq!(config, DiscoveryConfig::default());
    }

    #[test]
    fn test_from_file_names_the_path_on_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("collections.toml");
        std::fs::write(&path, "cap = [").unwrap();

        let err = DiscoveryConfig::from_file(&path).unwrap_err();
        match err {
            CollectionsError::Config { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_api_key_prefers_env() {
        let config = DiscoveryConfig {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };

        assert_eq!(
            config.resolve_api_key(Some("from-env".to_string())).unwrap(),
            "from-env"
        );
        assert_eq!(config.resolve_api_key(None).unwrap(), "from-file");
    }

    #[test]
    fn test_resolve_api_key_rejects_blank() {
        let config = DiscoveryConfig::default();
        assert!(matches!(
            config.resolve_api_key(Some("   ".to_string())),
            Err(CollectionsError::MissingApiKey)
        ));
        assert!(matches!(
            config.resolve_api_key(None),
            Err(CollectionsError::MissingApiKey)
        ));
    }
}
