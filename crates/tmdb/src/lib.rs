mod client;
mod collection;
mod error;
pub mod models;
mod search;

pub use client::{TmdbClient, BASE_URL};
pub use error::TmdbError;
pub use models::{Collection, CollectionPart, PaginatedResponse, SearchedCollection};

pub type Result<T> = std::result::Result<T, TmdbError>;
