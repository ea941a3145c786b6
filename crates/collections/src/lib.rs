//! Harvest TMDB movie collections into a local JSON store.
//!
//! ```text
//! franchise names ──search──▶ candidate ids ──detail──▶ Collection
//!                                                         │
//!            data/collections.json ◀──merge + rewrite─────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use collections::{harvest, DiscoveryConfig, TmdbSource};
//!
//! let config = DiscoveryConfig::default();
//! let source = TmdbSource::new(tmdb::TmdbClient::with_client(http, api_key));
//! let summary = harvest(&source, &config).await?;
//! ```

mod config;
mod discovery;
mod error;
mod harvest;
mod index;
mod source;
mod store;
mod verify;

pub use config::{DiscoveryConfig, PinnedCollection, API_KEY_ENV, DEFAULT_CAP, DEFAULT_OUTPUT};
pub use discovery::Discoverer;
pub use error::CollectionsError;
pub use harvest::{harvest, HarvestSummary};
pub use index::{Membership, MovieIndex};
pub use source::{CollectionSource, TmdbSource};
pub use store::CollectionStore;
pub use verify::{matches_pin, verify_pinned, PinReport, PinStatus};

pub type Result<T> = std::result::Result<T, CollectionsError>;
