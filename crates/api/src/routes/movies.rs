//! Route definitions for the `/movies` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::movie;
use crate::state::AppState;

/// Routes mounted at `/movies`.
///
/// ```text
/// POST /            -> create (requires auth)
/// GET  /search      -> search by title (public)
/// GET  /{id}        -> get by id (public)
/// PUT  /{id}        -> update (requires auth)
/// PUT  /{id}/rate   -> rate (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(movie::create))
        .route("/search", get(movie::search_by_title))
        .route("/{id}", get(movie::get_by_id).put(movie::update))
        .route("/{id}/rate", put(movie::rate))
}
