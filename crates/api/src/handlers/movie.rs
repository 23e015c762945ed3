//! Handlers for the `/movies` resource, including the rating endpoint.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use reelrate_core::error::CoreError;
use reelrate_core::rating::validate_score;
use reelrate_core::types::DbId;
use reelrate_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use reelrate_db::models::rating::Rating;
use reelrate_db::repositories::{MovieRepo, RatingRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /movies/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: String,
}

/// Request body for `PUT /movies/{id}/rate`.
#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub score: i32,
}

/// POST /movies
///
/// Create a new movie. Requires authentication.
pub async fn create(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(input): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let movie = MovieRepo::create(&state.pool, &input).await?;
    tracing::debug!(movie_id = movie.id, title = %movie.title, "Movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /movies/search?title=...
///
/// Case-insensitive substring search on movie titles.
pub async fn search_by_title(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieRepo::search_by_title(&state.pool, &query.title).await?;
    Ok(Json(movies))
}

/// GET /movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Movie>> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(movie_not_found(id))?;
    Ok(Json(movie))
}

/// PUT /movies/{id}
///
/// Update a movie's descriptive fields. Requires authentication.
pub async fn update(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMovie>,
) -> AppResult<Json<Movie>> {
    let movie = MovieRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(movie_not_found(id))?;

    tracing::debug!(movie_id = id, "Movie updated");
    Ok(Json(movie))
}

/// PUT /movies/{id}/rate
///
/// Record the authenticated user's score for the movie and refresh the
/// movie's aggregate fields. Upsert and recompute happen in one per-movie
/// transactional unit inside [`RatingRepo::rate`]; either both commit or
/// neither does.
pub async fn rate(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(movie_id): Path<DbId>,
    Json(input): Json<RateRequest>,
) -> AppResult<Json<Rating>> {
    // Reject out-of-range scores before touching storage.
    validate_score(input.score)?;

    let rating = RatingRepo::rate(&state.pool, auth_user.user_id, movie_id, input.score)
        .await?
        .ok_or(movie_not_found(movie_id))?;

    tracing::debug!(
        user_id = auth_user.user_id,
        movie_id,
        score = input.score,
        "Rating recorded"
    );
    Ok(Json(rating))
}

fn movie_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Movie",
        id,
    })
}
