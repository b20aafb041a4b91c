use axum::http::{header, HeaderValue, Method};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use bucketlist_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        providers::{build_http_client, OmdbProvider, OpenAiProvider, TmdbProvider},
        InMemoryFavouritesStore,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bucketlist_api=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;

    // One client for every provider; carries the outbound timeout
    let http_client = build_http_client(config.http_timeout())?;

    let metadata = Arc::new(TmdbProvider::new(
        http_client.clone(),
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    ));
    let completion = Arc::new(OpenAiProvider::new(
        http_client.clone(),
        config.openai_api_key.clone(),
        config.openai_api_url.clone(),
        config.openai_model.clone(),
    ));
    let ratings = Arc::new(OmdbProvider::new(
        http_client,
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
    ));
    let favourites = Arc::new(InMemoryFavouritesStore::new());

    let state = AppState::new(
        metadata,
        completion,
        ratings,
        favourites,
        config.ai_search_delay(),
    );

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let app = create_router(Arc::new(state)).layer(cors);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
