//! Plot-to-movie search
//!
//! Turns a free-text plot description into a ranked list of movies:
//! 1. the language model suggests titles (best match, its franchise, similar themes)
//! 2. titles, the plot itself and franchise keywords are searched in parallel
//! 3. results are deduplicated, quality-filtered and sorted into a candidate pool
//! 4. the language model ranks the pool by relevance

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{CandidateMovie, CompletionOptions},
    services::providers::{CompletionProvider, MetadataProvider},
};

pub mod aggregation;
pub mod franchise;
pub mod ranking;
pub mod titles;

pub use aggregation::{build_pool, gather_candidates, search_terms, MAX_CANDIDATE_POOL};
pub use franchise::franchise_keywords;
pub use ranking::{apply_ranking, parse_ranking, rank_candidates, MAX_RANKED_RESULTS};
pub use titles::{extract_titles, MAX_SUGGESTED_TITLES};

const SUGGESTION_OPTIONS: CompletionOptions = CompletionOptions::new(0.2, 200);

/// Where a search run currently is; `Done` and `Failed` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    Idle,
    FetchingSuggestions,
    SearchingCandidates,
    RankingCandidates,
    Done,
    Failed,
}

impl Display for SearchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SearchStage::Idle => "idle",
            SearchStage::FetchingSuggestions => "fetching_suggestions",
            SearchStage::SearchingCandidates => "searching_candidates",
            SearchStage::RankingCandidates => "ranking_candidates",
            SearchStage::Done => "done",
            SearchStage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// End-to-end AI search over a metadata provider and a completion provider
#[derive(Clone)]
pub struct AiSearch {
    metadata: Arc<dyn MetadataProvider>,
    completion: Arc<dyn CompletionProvider>,
    /// Pause before the first outbound call, keeps bursts under the LLM rate limit
    start_delay: Duration,
}

impl AiSearch {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        completion: Arc<dyn CompletionProvider>,
        start_delay: Duration,
    ) -> Self {
        Self {
            metadata,
            completion,
            start_delay,
        }
    }

    /// Runs the search; an empty result means nothing matched and is not an error
    pub async fn search(&self, plot_description: &str) -> AppResult<Vec<CandidateMovie>> {
        let mut stage = SearchStage::Idle;

        match self.run(plot_description, &mut stage).await {
            Ok(movies) => {
                advance(&mut stage, SearchStage::Done);
                tracing::info!(results = movies.len(), "AI search completed");
                Ok(movies)
            }
            Err(e) => {
                tracing::error!(
                    stage = %stage,
                    rate_limited = e.is_rate_limited(),
                    error = %e,
                    "AI search failed"
                );
                advance(&mut stage, SearchStage::Failed);
                Err(into_search_failure(e))
            }
        }
    }

    async fn run(
        &self,
        plot_description: &str,
        stage: &mut SearchStage,
    ) -> AppResult<Vec<CandidateMovie>> {
        tokio::time::sleep(self.start_delay).await;

        advance(stage, SearchStage::FetchingSuggestions);
        let suggestions = self
            .completion
            .complete(&suggestion_prompt(plot_description), SUGGESTION_OPTIONS)
            .await?;
        let titles = extract_titles(&suggestions);
        tracing::debug!(titles = ?titles, "Parsed suggested titles");

        advance(stage, SearchStage::SearchingCandidates);
        let keywords = franchise_keywords(plot_description);
        let terms = search_terms(&titles, plot_description, &keywords);
        let pool = gather_candidates(self.metadata.clone(), terms).await?;

        if pool.is_empty() {
            tracing::info!("No candidate movies found");
            return Ok(Vec::new());
        }

        advance(stage, SearchStage::RankingCandidates);
        rank_candidates(self.completion.as_ref(), plot_description, &pool).await
    }
}

/// Throttling stays distinguishable; every other failure is a generic upstream error
fn into_search_failure(error: AppError) -> AppError {
    match error {
        AppError::RateLimited(_) | AppError::ExternalApi(_) => error,
        other => AppError::ExternalApi(other.to_string()),
    }
}

fn advance(stage: &mut SearchStage, next: SearchStage) {
    tracing::debug!(from = %stage, to = %next, "AI search stage");
    *stage = next;
}

/// Prompt asking for candidate titles, one `Title (Year)` per line
pub fn suggestion_prompt(plot_description: &str) -> String {
    format!(
        r#"Based on this description: "{plot_description}"

Suggest 12-15 movie titles that match this description or its theme. Include:
1. The best known match first
2. Every sequel, prequel and other entry of the same franchise
3. Other movies with similar themes or plot elements

Format: one movie per line, only the title and year, like "Movie Title (Year)"

When a franchise matches, list all of its movies rather than just the first one."#
    )
}
