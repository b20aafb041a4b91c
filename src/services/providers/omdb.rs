//! OMDb ratings provider
//!
//! Looks titles up by IMDb id (`i=`) or by title and year (`t=`, `y=`), then
//! normalizes the IMDb, Rotten Tomatoes and Metacritic ratings.

use crate::{
    error::AppResult,
    models::{ExternalRatings, OmdbResponse, RatingsLookup},
    services::providers::{ensure_success, RatingsProvider},
};
use reqwest::Client as HttpClient;

const PROVIDER: &str = "omdb";

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
        }
    }

    fn lookup_params<'a>(&'a self, lookup: &'a RatingsLookup) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![("apikey", self.api_key.as_str())];
        match lookup {
            RatingsLookup::ImdbId(id) => params.push(("i", id.as_str())),
            RatingsLookup::TitleYear { title, year } => {
                params.push(("t", title.as_str()));
                params.push(("y", year.as_str()));
            }
        }
        params
    }
}

#[async_trait::async_trait]
impl RatingsProvider for OmdbProvider {
    async fn fetch_ratings(&self, lookup: &RatingsLookup) -> AppResult<Option<ExternalRatings>> {
        let response = self
            .http_client
            .get(format!("{}/", self.api_url.trim_end_matches('/')))
            .query(&self.lookup_params(lookup))
            .send()
            .await?;

        let response = ensure_success(response, PROVIDER).await?;
        let omdb: OmdbResponse = response.json().await?;

        if let Some(error) = omdb.error.as_deref() {
            tracing::debug!(lookup = %lookup, error = %error, provider = PROVIDER, "No ratings match");
        }

        let ratings = omdb.into_ratings();

        tracing::info!(
            lookup = %lookup,
            found = ratings.is_some(),
            provider = PROVIDER,
            "Ratings fetched"
        );

        Ok(ratings)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider() -> OmdbProvider {
        OmdbProvider::new(
            reqwest::Client::new(),
            "test_key".to_string(),
            "http://test.local".to_string(),
        )
    }

    #[test]
    fn test_params_by_imdb_id() {
        let provider = create_test_provider();
        let lookup = RatingsLookup::ImdbId("tt0133093".to_string());
        assert_eq!(
            provider.lookup_params(&lookup),
            vec![("apikey", "test_key"), ("i", "tt0133093")]
        );
    }

    #[test]
    fn test_params_by_title_and_year() {
        let provider = create_test_provider();
        let lookup = RatingsLookup::TitleYear {
            title: "The Matrix".to_string(),
            year: "1999".to_string(),
        };
        assert_eq!(
            provider.lookup_params(&lookup),
            vec![("apikey", "test_key"), ("t", "The Matrix"), ("y", "1999")]
        );
    }
}
