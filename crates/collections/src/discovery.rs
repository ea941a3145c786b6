//! Collection discovery
//!
//! Walks the configured franchise names, searches each one and fetches full
//! details for every id not seen yet. When the names run out before the cap
//! is hit, the fallback id list is walked the same way. The whole run stops
//! the moment `cap` collections have been gathered.

use std::collections::BTreeMap;
use std::time::Duration;

use tmdb::Collection;

use crate::{CollectionSource, CollectionsError, DiscoveryConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    CapReached,
}

pub struct Discoverer<'a> {
    source: &'a dyn CollectionSource,
    cap: usize,
    delay: Duration,
}

impl<'a> Discoverer<'a> {
    pub fn new(source: &'a dyn CollectionSource, cap: usize) -> Self {
        Self {
            source,
            cap,
            delay: Duration::ZERO,
        }
    }

    pub fn from_config(source: &'a dyn CollectionSource, config: &DiscoveryConfig) -> Self {
        Self::new(source, config.cap).with_delay(config.request_delay())
    }

    /// Pause after every successful detail fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn discover(
        &self,
        franchises: &[String],
        fallback_ids: &[i64],
    ) -> Result<BTreeMap<i64, Collection>, CollectionsError> {
        let mut found = BTreeMap::new();
        if self.cap == 0 {
            return Ok(found);
        }

        for franchise in franchises {
            tracing::info!("Searching for {} collections...", franchise);
            let results = self.source.search(franchise).await?;
            tracing::debug!(
                "{} returned {} results for '{}'",
                self.source.name(),
                results.len(),
                franchise
            );

            for result in results {
                if found.contains_key(&result.id) {
                    continue;
                }
                if self.fetch_into(&mut found, result.id).await? == Step::CapReached {
                    return Ok(found);
                }
            }
        }

        if !fallback_ids.is_empty() {
            tracing::info!(
                "Franchise search gave {}/{} collections, trying {} known ids",
                found.len(),
                self.cap,
                fallback_ids.len()
            );
        }

        for &id in fallback_ids {
            if found.contains_key(&id) {
                continue;
            }
            if self.fetch_into(&mut found, id).await? == Step::CapReached {
                return Ok(found);
            }
        }

        Ok(found)
    }

    async fn fetch_into(
        &self,
        found: &mut BTreeMap<i64, Collection>,
        id: i64,
    ) -> Result<Step, CollectionsError> {
        let Some(collection) = self.source.detail(id).await? else {
            return Ok(Step::Continue);
        };

        tracing::info!(
            "Found collection {}/{}: {}",
            found.len() + 1,
            self.cap,
            collection.name
        );
        found.insert(id, collection);

        if found.len() >= self.cap {
            return Ok(Step::CapReached);
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Step::Continue)
    }
}
