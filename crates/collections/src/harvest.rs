use crate::{CollectionSource, CollectionStore, CollectionsError, Discoverer, DiscoveryConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Collections fetched during this run
    pub fetched: usize,
    /// Entries in the store after the merge
    pub stored: usize,
}

/// Discover, then merge into the store at `config.output` and rewrite it.
pub async fn harvest(
    source: &dyn CollectionSource,
    config: &DiscoveryConfig,
) -> Result<HarvestSummary, CollectionsError> {
    let found = Discoverer::from_config(source, config)
        .discover(&config.franchises, &config.fallback_ids)
        .await?;
    let fetched = found.len();

    let mut store = CollectionStore::open(&config.output).await?;
    store.merge(found)?;
    store.save().await?;

    tracing::info!(
        "Updated {} with {} new collections ({} total)",
        store.path().display(),
        fetched,
        store.len()
    );

    Ok(HarvestSummary {
        fetched,
        stored: store.len(),
    })
}
