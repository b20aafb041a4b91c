//! External data provider abstractions
//!
//! The service aggregates three third-party APIs: a movie metadata provider (TMDB),
//! a language model provider (OpenAI) and a ratings provider (OMDb). Each sits behind
//! a trait so handlers and the AI search pipeline can be exercised against mocks.

use reqwest::{Client as HttpClient, Response, StatusCode};
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{
        CompletionOptions, ExternalRatings, MovieDetails, MoviePage, RatingsLookup,
    },
};

pub mod omdb;
pub mod openai;
pub mod tmdb;

pub use omdb::OmdbProvider;
pub use openai::OpenAiProvider;
pub use tmdb::TmdbProvider;

/// Movie metadata provider
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search movies by title keywords (first page of results)
    async fn search_movies(&self, term: &str) -> AppResult<MoviePage>;

    /// First page of the provider's popular movies
    async fn popular_movies(&self) -> AppResult<MoviePage>;

    /// Full details for one movie, including external ids and videos
    async fn movie_details(&self, id: u64) -> AppResult<MovieDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Language model completion provider
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the free-text completion for `prompt`
    ///
    /// Fails with `AppError::RateLimited` when the provider throttles the request.
    async fn complete(&self, prompt: &str, options: CompletionOptions) -> AppResult<String>;

    fn name(&self) -> &'static str;
}

/// Aggregated ratings provider
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingsProvider: Send + Sync {
    /// Returns `None` when the provider has no match for the lookup
    async fn fetch_ratings(&self, lookup: &RatingsLookup) -> AppResult<Option<ExternalRatings>>;

    fn name(&self) -> &'static str;
}

/// Builds the HTTP client shared by all providers
pub fn build_http_client(timeout: Duration) -> AppResult<HttpClient> {
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .map_err(AppError::from)
}

/// Maps a non-success upstream status onto the error taxonomy
pub(crate) async fn ensure_success(response: Response, provider: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!(
        provider = provider,
        status = %status,
        body = %body,
        "External API request failed"
    );

    Err(status_error(status, provider, &body))
}

fn status_error(status: StatusCode, provider: &str, body: &str) -> AppError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            AppError::RateLimited(format!("{} API returned status {}", provider, status))
        }
        StatusCode::NOT_FOUND => {
            AppError::NotFound(format!("{} API returned status {}: {}", provider, status, body))
        }
        _ => AppError::ExternalApi(format!(
            "{} API returned status {}: {}",
            provider, status, body
        )),
    }
}
