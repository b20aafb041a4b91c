use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::CandidateMovie,
    services::providers::MetadataProvider,
};

/// Most candidates handed to the ranking step
pub const MAX_CANDIDATE_POOL: usize = 40;

/// Characters of the plot description used as a direct search term
pub const PLOT_TERM_CHARS: usize = 100;

/// First `PLOT_TERM_CHARS` characters of the plot description
pub fn plot_search_term(plot_description: &str) -> String {
    plot_description.chars().take(PLOT_TERM_CHARS).collect()
}

/// Search terms in fan-out order: suggested titles, the plot itself, franchise keywords
///
/// The order decides which record wins when two searches return the same movie.
pub fn search_terms(titles: &[String], plot_description: &str, keywords: &[&str]) -> Vec<String> {
    titles
        .iter()
        .cloned()
        .chain(std::iter::once(plot_search_term(plot_description)))
        .chain(keywords.iter().map(|k| k.to_string()))
        .collect()
}

/// Runs every search concurrently and builds the candidate pool
///
/// A failed search contributes no results. Only when every search fails is the
/// metadata provider considered down.
pub async fn gather_candidates(
    provider: Arc<dyn MetadataProvider>,
    terms: Vec<String>,
) -> AppResult<Vec<CandidateMovie>> {
    let term_count = terms.len();
    let mut tasks = Vec::with_capacity(term_count);

    for term in terms {
        let provider = provider.clone();
        let task = tokio::spawn(async move {
            let result = provider.search_movies(&term).await.map(|page| page.results);
            (term, result)
        });
        tasks.push(task);
    }

    // Awaited in spawn order so concatenation follows the term order
    let mut result_sets = Vec::with_capacity(term_count);
    let mut failures = 0;

    for task in tasks {
        match task.await {
            Ok((_, Ok(movies))) => result_sets.push(movies),
            Ok((term, Err(e))) => {
                tracing::warn!(query = %term, error = %e, "Candidate search failed");
                failures += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, "Task join error");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        tracing::warn!(
            success_count = result_sets.len(),
            error_count = failures,
            "Partial candidate search failure"
        );
    }

    if result_sets.is_empty() && failures > 0 {
        return Err(AppError::ExternalApi(format!(
            "All {} candidate searches failed via {}",
            failures,
            provider.name()
        )));
    }

    let pool = build_pool(result_sets.into_iter().flatten());

    tracing::info!(
        searches = term_count,
        candidates = pool.len(),
        "Candidate pool built"
    );

    Ok(pool)
}

/// Dedups by id (first wins), keeps quality entries, sorts by popularity × rating, caps the size
pub fn build_pool(movies: impl IntoIterator<Item = CandidateMovie>) -> Vec<CandidateMovie> {
    let mut seen = HashSet::new();
    let mut pool: Vec<CandidateMovie> = movies
        .into_iter()
        .filter(|movie| seen.insert(movie.id))
        .filter(CandidateMovie::is_quality)
        .collect();

    pool.sort_by(|a, b| b.score().total_cmp(&a.score()));
    pool.truncate(MAX_CANDIDATE_POOL);
    pool
}
