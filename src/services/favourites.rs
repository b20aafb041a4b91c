use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::CandidateMovie;

/// Storage for the movies a user marked as favourite
#[async_trait::async_trait]
pub trait FavouritesStore: Send + Sync {
    /// Adds a movie; returns `false` if a movie with the same id is already stored
    async fn add(&self, movie: CandidateMovie) -> bool;

    /// Removes a movie by id; returns `false` if it was not stored
    async fn remove(&self, id: u64) -> bool;

    async fn contains(&self, id: u64) -> bool;

    /// All favourites in the order they were added
    async fn list(&self) -> Vec<CandidateMovie>;
}

/// Process-local favourites, lost on restart
#[derive(Clone, Default)]
pub struct InMemoryFavouritesStore {
    inner: Arc<RwLock<Vec<CandidateMovie>>>,
}

impl InMemoryFavouritesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl FavouritesStore for InMemoryFavouritesStore {
    async fn add(&self, movie: CandidateMovie) -> bool {
        let mut favourites = self.inner.write().await;
        if favourites.iter().any(|m| m.id == movie.id) {
            return false;
        }
        favourites.push(movie);
        true
    }

    async fn remove(&self, id: u64) -> bool {
        let mut favourites = self.inner.write().await;
        let before = favourites.len();
        favourites.retain(|m| m.id != id);
        favourites.len() != before
    }

    async fn contains(&self, id: u64) -> bool {
        self.inner.read().await.iter().any(|m| m.id == id)
    }

    async fn list(&self) -> Vec<CandidateMovie> {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str) -> CandidateMovie {
        CandidateMovie {
            id,
            title: title.to_string(),
            overview: String::new(),
            popularity: 0.0,
            vote_average: 0.0,
            vote_count: 0,
            poster_path: None,
            backdrop_path: None,
            release_date: None,
        }
    }

    #[tokio::test]
    async fn test_add_and_list_in_order() {
        let store = InMemoryFavouritesStore::new();
        assert!(store.add(movie(2, "Up")).await);
        assert!(store.add(movie(1, "Coco")).await);

        let ids: Vec<u64> = store.list().await.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_add_duplicate_is_ignored() {
        let store = InMemoryFavouritesStore::new();
        assert!(store.add(movie(1, "Coco")).await);
        assert!(!store.add(movie(1, "Coco (re-release)")).await);

        let favourites = store.list().await;
        assert_eq!(favourites.len(), 1);
        assert_eq!(favourites[0].title, "Coco");
    }

    #[tokio::test]
    async fn test_remove_and_contains() {
        let store = InMemoryFavouritesStore::new();
        store.add(movie(1, "Coco")).await;

        assert!(store.contains(1).await);
        assert!(store.remove(1).await);
        assert!(!store.contains(1).await);
        assert!(!store.remove(1).await);
    }

    #[test]
    fn test_clones_share_state() {
        let store = InMemoryFavouritesStore::new();
        let handle = store.clone();
        tokio_test::block_on(handle.add(movie(9, "Soul")));
        assert!(tokio_test::block_on(store.contains(9)));
    }
}
