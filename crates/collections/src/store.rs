//! Local JSON store of collections keyed by TMDB id
//!
//! At rest the store is one JSON object, `{"<id>": Collection, ...}`,
//! pretty-printed with two-space indentation. Entries are held as raw JSON:
//! the ones a run does not touch are written back exactly as they were read,
//! whatever fields they carry. Only entries a run writes go through
//! [`Collection`].

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tmdb::Collection;

use crate::CollectionsError;

pub struct CollectionStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl CollectionStore {
    /// Empty store bound to `path`; nothing is read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Map::new(),
        }
    }

    /// Open the store at `path`.
    ///
    /// A missing file, or content that is not a JSON object, yields an empty
    /// store. Other read failures (permissions, path is a directory) are
    /// returned.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, CollectionsError> {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) => Self::parse(&content).unwrap_or_else(|reason| {
                tracing::warn!(
                    "Ignoring malformed collection store {}: {}",
                    path.display(),
                    reason
                );
                Map::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No collection store at {}, starting empty", path.display());
                Map::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, entries })
    }

    fn parse(content: &str) -> Result<Map<String, Value>, String> {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) => Err("top level is not an object".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id.to_string())
    }

    /// The stored JSON for `id`, as it will be written.
    pub fn get_raw(&self, id: i64) -> Option<&Value> {
        self.entries.get(&id.to_string())
    }

    /// Decode the entry for `id`. Entries that do not fit [`Collection`]
    /// read as `None` but stay in the store.
    pub fn get(&self, id: i64) -> Option<Collection> {
        self.get_raw(id).and_then(decode)
    }

    /// Every entry that has a numeric key and decodes as a [`Collection`].
    pub fn collections(&self) -> impl Iterator<Item = (i64, Collection)> + '_ {
        self.entries.iter().filter_map(|(key, value)| {
            let id = key.parse::<i64>().ok()?;
            Some((id, decode(value)?))
        })
    }

    /// Insert or replace the entry under `id`. The stored record's own `id`
    /// is set to the key so the two never disagree.
    pub fn upsert(&mut self, id: i64, mut collection: Collection) -> Result<(), CollectionsError> {
        collection.id = id;
        let value = serde_json::to_value(collection)?;
        self.entries.insert(id.to_string(), value);
        Ok(())
    }

    /// Overlay a fetched batch. Whole entries are replaced, the batch wins;
    /// entries outside the batch are untouched. Returns how many entries were
    /// written.
    pub fn merge<I>(&mut self, batch: I) -> Result<usize, CollectionsError>
    where
        I: IntoIterator<Item = (i64, Collection)>,
    {
        let mut written = 0;
        for (id, collection) in batch {
            self.upsert(id, collection)?;
            written += 1;
        }
        Ok(written)
    }

    pub fn to_json(&self) -> Result<String, CollectionsError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Rewrite the whole file.
    /// Writes a sibling temp file, then renames it over the target.
    pub async fn save(&self) -> Result<(), CollectionsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = self.to_json()?;
        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, &json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(
            "Saved {} collections to {}",
            self.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "collections.json".to_string());
        self.path.with_file_name(format!("{}.tmp", file_name))
    }
}

fn decode(value: &Value) -> Option<Collection> {
    Collection::deserialize(value).ok()
}
