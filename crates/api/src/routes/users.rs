//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /me    -> own profile with rated movies (requires auth)
/// GET /{id}  -> profile with rated movies (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(user::get_me))
        .route("/{id}", get(user::get_by_id))
}
