use std::collections::HashSet;

use crate::{
    error::AppResult,
    models::{CandidateMovie, CompletionOptions},
    services::providers::CompletionProvider,
};

/// Most movies returned from a ranked search
pub const MAX_RANKED_RESULTS: usize = 15;

/// A ranking with fewer usable entries than this is treated as malformed
pub const MIN_RANKED_RESULTS: usize = 3;

/// Size of the popularity fallback when the ranking is malformed
pub const FALLBACK_RESULTS: usize = 12;

const RANKING_OPTIONS: CompletionOptions = CompletionOptions::new(0.1, 100);

/// Asks the language model to order the pool by relevance to the plot
///
/// Falls back to the head of the (popularity-sorted) pool when the answer
/// yields too few usable positions. Completion failures propagate.
pub async fn rank_candidates(
    completion: &dyn CompletionProvider,
    plot_description: &str,
    pool: &[CandidateMovie],
) -> AppResult<Vec<CandidateMovie>> {
    let prompt = ranking_prompt(plot_description, pool);
    let answer = completion.complete(&prompt, RANKING_OPTIONS).await?;

    let indices = parse_ranking(&answer, pool.len());
    tracing::debug!(answer = %answer, indices = ?indices, "Ranking parsed");

    Ok(apply_ranking(pool, &indices))
}

pub fn ranking_prompt(plot_description: &str, pool: &[CandidateMovie]) -> String {
    let listing = pool
        .iter()
        .enumerate()
        .map(|(i, movie)| {
            let year = movie
                .release_year()
                .map(|y| y.to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            format!(
                "{}. {} ({})\n    Plot: {}",
                i + 1,
                movie.title,
                year,
                movie.overview
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"Rank these movies by how closely they match this description: "{plot_description}"

MOVIES TO RANK:
{listing}

Instructions:
- Return the numbers of the 10-15 best matches, most relevant first
- When a movie matches, also include its sequels, prequels and other entries of the same franchise
- Leave out movies that do not really fit the description
- Answer with the numbers only, separated by commas (e.g. "5,12,3,8,1")"#
    )
}

/// Reads the 1-based positions out of the model's answer as 0-based pool indices
///
/// Out-of-range positions are dropped; a repeated position keeps its first mention.
pub fn parse_ranking(answer: &str, pool_len: usize) -> Vec<usize> {
    let mut seen = HashSet::new();

    answer
        .split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<usize>().ok())
        .filter_map(|position| position.checked_sub(1))
        .filter(|&index| index < pool_len)
        .filter(|&index| seen.insert(index))
        .collect()
}

/// Reorders the pool by `indices`, or falls back to its first entries
pub fn apply_ranking(pool: &[CandidateMovie], indices: &[usize]) -> Vec<CandidateMovie> {
    let ranked: Vec<CandidateMovie> = indices
        .iter()
        .filter_map(|&index| pool.get(index))
        .take(MAX_RANKED_RESULTS)
        .cloned()
        .collect();

    if ranked.len() < MIN_RANKED_RESULTS {
        tracing::info!(
            ranked = ranked.len(),
            "AI ranking insufficient, using popularity fallback"
        );
        return pool.iter().take(FALLBACK_RESULTS).cloned().collect();
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::providers::MockCompletionProvider;

    fn pool(size: u64) -> Vec<CandidateMovie> {
        (1..=size)
            .map(|id| CandidateMovie {
                id,
                title: format!("Movie {}", id),
                overview: format!("Plot {}", id),
                popularity: 10.0,
                vote_average: 7.0,
                vote_count: 10,
                poster_path: Some("/p.jpg".to_string()),
                backdrop_path: None,
                release_date: if id == 2 { None } else { Some("1999-03-31".to_string()) },
            })
            .collect()
    }

    fn ids(movies: &[CandidateMovie]) -> Vec<u64> {
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_prompt_lists_candidates() {
        let prompt = ranking_prompt("hackers in a simulation", &pool(2));
        assert!(prompt.contains("\"hackers in a simulation\""));
        assert!(prompt.contains("1. Movie 1 (1999)\n    Plot: Plot 1"));
        assert!(prompt.contains("2. Movie 2 (Unknown)\n    Plot: Plot 2"));
    }

    #[test]
    fn test_parse_plain_list() {
        assert_eq!(parse_ranking("5,12,3,8,1", 20), vec![4, 11, 2, 7, 0]);
    }

    #[test]
    fn test_parse_noisy_answer() {
        assert_eq!(
            parse_ranking("Best matches: 3, 1 and 2.\n(then 0 and 99)", 5),
            vec![2, 0, 1]
        );
    }

    #[test]
    fn test_parse_repeats_and_overflow() {
        assert_eq!(
            parse_ranking("2,2,1,99999999999999999999999,3", 3),
            vec![1, 0, 2]
        );
    }

    #[test]
    fn test_parse_no_numbers() {
        assert!(parse_ranking("I cannot rank these movies.", 10).is_empty());
    }

    #[test]
    fn test_apply_reorders() {
        let pool = pool(10);
        let ranked = apply_ranking(&pool, &[9, 0, 4, 2]);
        assert_eq!(ids(&ranked), vec![10, 1, 5, 3]);
    }

    #[test]
    fn test_apply_caps_at_fifteen() {
        let pool = pool(40);
        let indices: Vec<usize> = (0..30).rev().collect();
        let ranked = apply_ranking(&pool, &indices);
        assert_eq!(ranked.len(), MAX_RANKED_RESULTS);
        assert_eq!(ranked[0].id, 30);
    }

    #[test]
    fn test_apply_falls_back_below_three() {
        let pool = pool(20);
        let ranked = apply_ranking(&pool, &[5, 6]);
        assert_eq!(ranked, pool[..FALLBACK_RESULTS].to_vec());
    }

    #[test]
    fn test_apply_fallback_on_small_pool() {
        let pool = pool(2);
        let ranked = apply_ranking(&pool, &[1, 0]);
        assert_eq!(ranked, pool);
    }

    #[test]
    fn test_ranked_is_subset_of_pool() {
        let pool = pool(8);
        let indices = parse_ranking("8, 3, 12, 1, 0, 5", pool.len());
        let ranked = apply_ranking(&pool, &indices);
        let pool_ids = ids(&pool);
        assert!(ranked.iter().all(|m| pool_ids.contains(&m.id)));
        assert_eq!(ids(&ranked), vec![8, 3, 1, 5]);
    }

    #[tokio::test]
    async fn test_rank_candidates_uses_model_order() {
        let mut completion = MockCompletionProvider::new();
        completion
            .expect_complete()
            .withf(|prompt, options| prompt.contains("MOVIES TO RANK") && options.temperature < 0.2)
            .times(1)
            .returning(|_, _| Ok("3,1,2".to_string()));

        let pool = pool(5);
        let ranked = rank_candidates(&completion, "plot", &pool).await.unwrap();
        assert_eq!(ids(&ranked), vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_rank_candidates_unparseable_answer_falls_back() {
        let mut completion = MockCompletionProvider::new();
        completion
            .expect_complete()
            .returning(|_, _| Ok("Sorry, none of these match.".to_string()));

        let pool = pool(20);
        let ranked = rank_candidates(&completion, "plot", &pool).await.unwrap();
        assert_eq!(ranked, pool[..FALLBACK_RESULTS].to_vec());
    }

    #[tokio::test]
    async fn test_rank_candidates_propagates_rate_limit() {
        let mut completion = MockCompletionProvider::new();
        completion
            .expect_complete()
            .returning(|_, _| Err(AppError::RateLimited("openai".to_string())));

        let result = rank_candidates(&completion, "plot", &pool(5)).await;
        assert!(matches!(result, Err(AppError::RateLimited(_))));
    }
}
