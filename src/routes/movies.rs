use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{ExternalRatings, MovieDetails, MoviePage, RatingsLookup},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RatingsQuery {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    year: Option<String>,
}

/// Movie details plus the resolved IMDb id and trailer link
#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    #[serde(flatten)]
    pub details: MovieDetails,
    pub trailer_url: Option<String>,
}

impl From<MovieDetails> for DetailsResponse {
    fn from(mut details: MovieDetails) -> Self {
        // Top-level imdb_id carries the resolved id the ratings endpoint takes
        details.imdb_id = details.imdb_id().map(String::from);
        let trailer_url = details.trailer_url();
        Self {
            details,
            trailer_url,
        }
    }
}

/// Handler for the popular movies endpoint
pub async fn popular(State(state): State<Arc<AppState>>) -> AppResult<Json<MoviePage>> {
    let page = state.metadata.popular_movies().await?;
    Ok(Json(page))
}

/// Handler for keyword title search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<MoviePage>> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Search query cannot be empty".to_string()))?;

    let page = state.metadata.search_movies(query).await?;

    tracing::info!(
        query = %query,
        results = page.results.len(),
        total = page.total_results,
        provider = state.metadata.name(),
        "Title search completed"
    );

    Ok(Json(page))
}

/// Handler for movie details (with external ids and videos)
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<Json<DetailsResponse>> {
    let details = state.metadata.movie_details(id).await?;
    Ok(Json(DetailsResponse::from(details)))
}

/// Handler for external ratings; responds `null` when the provider has no match
pub async fn ratings(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(imdb_id): Path<String>,
    Query(params): Query<RatingsQuery>,
) -> AppResult<Json<Option<ExternalRatings>>> {
    let lookup = RatingsLookup::from_params(
        Some(imdb_id.as_str()),
        params.title.as_deref(),
        params.year.as_deref(),
    )?;

    tracing::info!(
        request_id = %request_id,
        lookup = %lookup,
        provider = state.ratings.name(),
        "External ratings request"
    );

    let ratings = state.ratings.fetch_ratings(&lookup).await?;
    Ok(Json(ratings))
}
