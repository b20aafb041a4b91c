pub mod ai_search;
pub mod favourites;
pub mod providers;

pub use ai_search::AiSearch;
pub use favourites::{FavouritesStore, InMemoryFavouritesStore};
pub use providers::{CompletionProvider, MetadataProvider, RatingsProvider};
