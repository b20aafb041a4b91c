use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Lowest vote average a movie may have to enter the candidate pool (exclusive)
pub const MIN_VOTE_AVERAGE: f64 = 1.5;

/// Treats an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A movie record as returned by TMDB list endpoints (search, popular)
///
/// Identity is the numeric `id`; two records with the same id are the same
/// movie even if the other fields differ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateMovie {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl CandidateMovie {
    /// Ordering key for the candidate pool
    pub fn score(&self) -> f64 {
        self.popularity * self.vote_average
    }

    /// Whether the record is good enough to show to a user
    pub fn is_quality(&self) -> bool {
        !self.title.is_empty()
            && !self.overview.is_empty()
            && self.vote_average > MIN_VOTE_AVERAGE
            && self.poster_path.as_deref().is_some_and(|p| !p.is_empty())
            && !self.title.to_lowercase().contains("untitled")
    }

    /// Release year parsed from `release_date` (`YYYY-MM-DD`)
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|d| d.year())
    }
}

/// One page of TMDB list results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<CandidateMovie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl From<Vec<CandidateMovie>> for MoviePage {
    /// Wraps results as a single complete page
    fn from(results: Vec<CandidateMovie>) -> Self {
        let total = results.len() as u32;
        Self {
            page: 1,
            results,
            total_pages: 1,
            total_results: total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

impl Video {
    fn is_youtube_trailer(&self) -> bool {
        self.video_type == "Trailer" && self.site == "YouTube"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Full movie record with the `external_ids` and `videos` sub-resources appended
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub external_ids: ExternalIds,
    #[serde(default)]
    pub videos: VideoList,
}

impl MovieDetails {
    /// IMDb id from the appended external ids, falling back to the top-level field
    pub fn imdb_id(&self) -> Option<&str> {
        self.external_ids
            .imdb_id
            .as_deref()
            .or(self.imdb_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// YouTube link for the best trailer: official ones first
    pub fn trailer_url(&self) -> Option<String> {
        let videos = &self.videos.results;
        videos
            .iter()
            .find(|v| v.is_youtube_trailer() && v.official)
            .or_else(|| videos.iter().find(|v| v.is_youtube_trailer()))
            .map(|v| format!("https://www.youtube.com/watch?v={}", v.key))
    }
}
