use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::CollectionStore;

/// Which collection a film belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub collection_id: i64,
    pub collection_name: String,
    pub movie_count: usize,
}

/// Reverse lookup from film id to the collection holding it.
#[derive(Debug, Default)]
pub struct MovieIndex {
    by_movie: HashMap<i64, Membership>,
}

impl MovieIndex {
    /// Parts without an id are skipped. A film listed in several collections
    /// maps to the one with the highest collection id.
    pub fn build(store: &CollectionStore) -> Self {
        let mut by_movie: HashMap<i64, Membership> = HashMap::new();
        for (collection_id, collection) in store.collections() {
            for movie_id in collection.parts.iter().filter_map(|part| part.id) {
                let membership = Membership {
                    collection_id,
                    collection_name: collection.name.clone(),
                    movie_count: collection.parts.len(),
                };
                match by_movie.entry(movie_id) {
                    Entry::Occupied(mut held) => {
                        if held.get().collection_id < collection_id {
                            held.insert(membership);
                        }
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(membership);
                    }
                }
            }
        }
        Self { by_movie }
    }

    pub fn collection_for_movie(&self, movie_id: i64) -> Option<&Membership> {
        self.by_movie.get(&movie_id)
    }

    pub fn len(&self) -> usize {
        self.by_movie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_movie.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tmdb::Collection;

    #[test]
    fn test_collection_for_movie() {
        let mut store = CollectionStore::new("unused.json");
        let star_wars: Collection = serde_json::from_value(json!({
            "id": 10,
            "name": "Star Wars Collection",
            "poster_path": null,
            "backdrop_path": null,
            "parts": [
                { "id": 11, "title": "Star Wars" },
                { "id": 1891, "title": "The Empire Strikes Back" },
                { "title": "Untitled" }
            ]
        }))
        .unwrap();
        store.upsert(10, star_wars).unwrap();

        let index = MovieIndex::build(&store);

        assert_eq!(index.len(), 2);
        assert_eq!(
            index.collection_for_movie(1891),
            Some(&Membership {
                collection_id: 10,
                collection_name: "Star Wars Collection".to_string(),
                movie_count: 3,
            })
        );
        assert!(index.collection_for_movie(603).is_none());
    }

    #[test]
    fn test_shared_film_maps_to_highest_collection_id() {
        let mut store = CollectionStore::new("unused.json");
        for (id, name) in [(263, "The Dark Knight Collection"), (120794, "Batman Collection")] {
            let collection: Collection = serde_json::from_value(json!({
                "id": id,
                "name": name,
                "poster_path": null,
                "backdrop_path": null,
                "parts": [{ "id": 155, "title": "The Dark Knight" }]
            }))
            .unwrap();
            store.upsert(id, collection).unwrap();
        }
        // later insert with a lower id must not take over
        store
            .upsert(
                9,
                serde_json::from_value(json!({
                    "id": 9, "name": "Odd", "poster_path": null, "backdrop_path": null,
                    "parts": [{ "id": 155 }]
                }))
                .unwrap(),
            )
            .unwrap();

        let index = MovieIndex::build(&store);
        assert_eq!(index.collection_for_movie(155).unwrap().collection_id, 120794);
    }

    #[test]
    fn test_empty_store_builds_empty_index() {
        let index = MovieIndex::build(&CollectionStore::new("unused.json"));
        assert!(index.is_empty());
    }
}
