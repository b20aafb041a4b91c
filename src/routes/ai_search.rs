use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::CandidateMovie,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSearchRequest {
    /// Missing counts as blank, so it is rejected with the usual error body
    #[serde(default)]
    pub plot_description: String,
}

/// Handler for the plot-description search endpoint
///
/// Responds with the ranked movies (possibly none), 429 when the language model
/// provider is rate limiting, or a generic upstream failure.
pub async fn ai_search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<AiSearchRequest>,
) -> AppResult<Json<Vec<CandidateMovie>>> {
    let plot_description = request.plot_description.trim();
    if plot_description.is_empty() {
        return Err(AppError::InvalidInput(
            "Plot description cannot be empty".to_string(),
        ));
    }

    tracing::info!(
        request_id = %request_id,
        plot = %plot_description,
        "Processing AI search request"
    );

    let movies = state.ai_search.search(plot_description).await?;

    tracing::info!(
        request_id = %request_id,
        results = movies.len(),
        "AI search request completed"
    );

    Ok(Json(movies))
}
