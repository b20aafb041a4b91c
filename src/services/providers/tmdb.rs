//! TMDB (The Movie Database) provider
//!
//! API Flow:
//! 1. Search: /search/movie?query=… → page of movie records
//! 2. Popular: /movie/popular → page of movie records
//! 3. Details: /movie/{id}?append_to_response=external_ids,videos

use crate::{
    error::AppResult,
    models::{MovieDetails, MoviePage},
    services::providers::{ensure_success, MetadataProvider},
};
use reqwest::Client as HttpClient;

const PROVIDER: &str = "tmdb";
const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }

    async fn fetch_page(&self, path: &str, extra: &[(&str, &str)]) -> AppResult<MoviePage> {
        let response = self
            .http_client
            .get(self.url(path))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", LANGUAGE),
                ("page", "1"),
            ])
            .query(extra)
            .send()
            .await?;

        let response = ensure_success(response, PROVIDER).await?;
        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_movies(&self, term: &str) -> AppResult<MoviePage> {
        let page = self.fetch_page("search/movie", &[("query", term)]).await?;

        tracing::debug!(
            query = %term,
            results = page.results.len(),
            provider = PROVIDER,
            "Movie search completed"
        );

        Ok(page)
    }

    async fn popular_movies(&self) -> AppResult<MoviePage> {
        let page = self.fetch_page("movie/popular", &[]).await?;

        tracing::info!(
            results = page.results.len(),
            provider = PROVIDER,
            "Popular movies fetched"
        );

        Ok(page)
    }

    async fn movie_details(&self, id: u64) -> AppResult<MovieDetails> {
        let response = self
            .http_client
            .get(self.url(&format!("movie/{}", id)))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("append_to_response", "external_ids,videos"),
            ])
            .send()
            .await?;

        let response = ensure_success(response, PROVIDER).await?;
        let details: MovieDetails = response.json().await?;

        tracing::info!(
            movie_id = id,
            videos = details.videos.results.len(),
            provider = PROVIDER,
            "Movie details fetched"
        );

        Ok(details)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider(api_url: &str) -> TmdbProvider {
        TmdbProvider::new(
            reqwest::Client::new(),
            "test_key".to_string(),
            api_url.to_string(),
        )
    }

    #[test]
    fn test_url_joins_paths() {
        let provider = create_test_provider("https://api.themoviedb.org/3");
        assert_eq!(
            provider.url("search/movie"),
            "https://api.themoviedb.org/3/search/movie"
        );
    }

    #[test]
    fn test_url_tolerates_trailing_slash() {
        let provider = create_test_provider("http://test.local/3/");
        assert_eq!(provider.url("movie/603"), "http://test.local/3/movie/603");
    }

    #[test]
    fn test_search_page_deserialization() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 120, "title": "The Lord of the Rings: The Fellowship of the Ring", "overview": "Young hobbit Frodo...", "popularity": 90.1, "vote_average": 8.4, "poster_path": "/6oom5QYQ2yQTMJIbnvbkBL9cHo6.jpg", "release_date": "2001-12-18"},
                {"id": 121, "title": "The Two Towers", "overview": null, "poster_path": null}
            ],
            "total_pages": 1,
            "total_results": 2
        }"#;

        let page: MoviePage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].id, 120);
        assert_eq!(page.results[1].overview, "");
        assert_eq!(page.total_results, 2);
    }

    #[test]
    fn test_name() {
        assert_eq!(create_test_provider("http://test.local").name(), "tmdb");
    }
}
