use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::{AppError, AppResult};

/// Marker the web client sends when it has no IMDb id for a movie
const MISSING_ID_MARKER: &str = "undefined";

/// Ratings from the three sources the ratings provider aggregates
///
/// Each field is `None` when that source has no rating for the title.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRatings {
    pub imdb: Option<String>,
    pub rotten_tomatoes: Option<String>,
    pub metacritic: Option<String>,
}

/// How to look a title up at the ratings provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingsLookup {
    /// IMDb id (e.g., "tt0133093"), the most accurate lookup
    ImdbId(String),
    TitleYear { title: String, year: String },
}

impl RatingsLookup {
    /// Builds a lookup from the ratings endpoint parameters
    ///
    /// Prefers the IMDb id; `year` may be a full release date, only the year part is used.
    pub fn from_params(
        imdb_id: Option<&str>,
        title: Option<&str>,
        year: Option<&str>,
    ) -> AppResult<Self> {
        if let Some(id) = imdb_id
            .map(str::trim)
            .filter(|id| !id.is_empty() && *id != MISSING_ID_MARKER)
        {
            return Ok(RatingsLookup::ImdbId(id.to_string()));
        }

        let title = title.map(str::trim).filter(|t| !t.is_empty());
        let year = year
            .and_then(|y| y.split('-').next())
            .map(str::trim)
            .filter(|y| !y.is_empty());

        match (title, year) {
            (Some(title), Some(year)) => Ok(RatingsLookup::TitleYear {
                title: title.to_string(),
                year: year.to_string(),
            }),
            _ => Err(AppError::InvalidInput(
                "Either imdbId or title+year required".to_string(),
            )),
        }
    }
}

impl Display for RatingsLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingsLookup::ImdbId(id) => write!(f, "{}", id),
            RatingsLookup::TitleYear { title, year } => write!(f, "{} ({})", title, year),
        }
    }
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw response from the OMDb API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbResponse {
    /// "True" when the title was found, "False" otherwise
    pub response: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(default)]
    pub ratings: Vec<OmdbRating>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbRating {
    pub source: String,
    pub value: String,
}

impl OmdbResponse {
    /// Normalizes the provider response; `None` when the provider found no match
    pub fn into_ratings(self) -> Option<ExternalRatings> {
        if self.response != "True" {
            return None;
        }

        let mut ratings = ExternalRatings {
            imdb: self.imdb_rating.filter(|r| r != "N/A"),
            ..Default::default()
        };

        for rating in self.ratings {
            match rating.source.as_str() {
                "Rotten Tomatoes" => ratings.rotten_tomatoes = Some(rating.value),
                "Metacritic" => ratings.metacritic = Some(rating.value),
                _ => {}
            }
        }

        Some(ratings)
    }
}
