//! Pinned collection verification
//!
//! Some collections must exist in the store under a known name. Entries that
//! are missing or carry a different name are refetched, and a fetched payload
//! is only accepted when it matches too.

use std::time::Duration;

use tmdb::Collection;

use crate::{CollectionSource, CollectionStore, CollectionsError, PinnedCollection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinStatus {
    /// Already stored under the expected name
    Valid,
    /// Fetched again and stored
    Refetched,
    /// Still missing or mismatched after the fetch
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinReport {
    pub id: i64,
    pub expected: String,
    pub status: PinStatus,
}

pub fn matches_pin(collection: Option<&Collection>, expected: &str) -> bool {
    match collection {
        Some(collection) if collection.name.is_empty() => false,
        Some(collection) if collection.name != expected => {
            tracing::warn!(
                "Collection name mismatch. Expected: {}, Got: {}",
                expected,
                collection.name
            );
            false
        }
        Some(_) => true,
        None => false,
    }
}

/// Check every pin against `store`, refetching the ones that fail.
/// The store is modified in memory only; the caller saves it.
pub async fn verify_pinned(
    source: &dyn CollectionSource,
    store: &mut CollectionStore,
    pinned: &[PinnedCollection],
    delay: Duration,
) -> Result<Vec<PinReport>, CollectionsError> {
    let mut reports = Vec::with_capacity(pinned.len());
    let mut fetched = false;

    for pin in pinned {
        if matches_pin(store.get(pin.id).as_ref(), &pin.name) {
            tracing::info!("{} ({}) is valid", pin.name, pin.id);
            reports.push(PinReport {
                id: pin.id,
                expected: pin.name.clone(),
                status: PinStatus::Valid,
            });
            continue;
        }

        if fetched && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        fetched = true;

        tracing::info!("Fetching collection: {} (ID: {})", pin.name, pin.id);
        let status = match source.detail(pin.id).await? {
            Some(collection) if matches_pin(Some(&collection), &pin.name) => {
                store.upsert(pin.id, collection)?;
                tracing::info!("Fetched and validated {}", pin.name);
                PinStatus::Refetched
            }
            _ => {
                tracing::warn!("Failed to fetch or validate {}", pin.name);
                PinStatus::Failed
            }
        };

        reports.push(PinReport {
            id: pin.id,
            expected: pin.name.clone(),
            status,
        });
    }

    Ok(reports)
}
