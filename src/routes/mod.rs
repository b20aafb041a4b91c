use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{
        AiSearch, CompletionProvider, FavouritesStore, MetadataProvider, RatingsProvider,
    },
};

pub mod ai_search;
pub mod favourites;
pub mod movies;

/// Shared application state
pub struct AppState {
    pub metadata: Arc<dyn MetadataProvider>,
    pub ratings: Arc<dyn RatingsProvider>,
    pub favourites: Arc<dyn FavouritesStore>,
    pub ai_search: AiSearch,
}

impl AppState {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        completion: Arc<dyn CompletionProvider>,
        ratings: Arc<dyn RatingsProvider>,
        favourites: Arc<dyn FavouritesStore>,
        ai_search_delay: Duration,
    ) -> Self {
        let ai_search = AiSearch::new(metadata.clone(), completion, ai_search_delay);

        Self {
            metadata,
            ratings,
            favourites,
            ai_search,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/movies", movie_routes())
        .nest("/api/favourites", favourite_routes())
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// Movie routes under /api/movies
fn movie_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/popular", get(movies::popular))
        .route("/search", get(movies::search))
        .route("/details/:id", get(movies::details))
        .route("/ratings/:imdb_id", get(movies::ratings))
        .route("/ai-search", post(ai_search::ai_search))
}

/// Favourite routes under /api/favourites
fn favourite_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(favourites::list).post(favourites::add))
        .route("/:id", get(favourites::status).delete(favourites::remove))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "BucketList Movie API is running!" }))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
