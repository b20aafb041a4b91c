use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::CandidateMovie,
    routes::AppState,
};

#[derive(Debug, Serialize)]
pub struct FavouriteStatus {
    pub id: u64,
    pub favourite: bool,
}

/// List favourites in the order they were added
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<CandidateMovie>> {
    Json(state.favourites.list().await)
}

/// Add a favourite; 201 when newly added, 200 when it was already stored
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<CandidateMovie>,
) -> (StatusCode, Json<CandidateMovie>) {
    let added = state.favourites.add(movie.clone()).await;
    tracing::info!(movie_id = movie.id, added = added, "Favourite added");

    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    (status, Json(movie))
}

pub async fn status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Json<FavouriteStatus> {
    let favourite = state.favourites.contains(id).await;
    Json(FavouriteStatus { id, favourite })
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<StatusCode> {
    if !state.favourites.remove(id).await {
        return Err(AppError::NotFound(format!("Movie {} is not a favourite", id)));
    }

    tracing::info!(movie_id = id, "Favourite removed");
    Ok(StatusCode::NO_CONTENT)
}
