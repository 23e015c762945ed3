pub mod auth;
pub mod health;
pub mod movies;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (health is mounted separately).
///
/// Route hierarchy:
///
/// ```text
/// /auth/register          register (public)
/// /auth/login             login (public)
/// /auth/profile           own identity view (requires auth)
///
/// /movies                 create (requires auth)
/// /movies/search          search by title (public)
/// /movies/{id}            get (public), update (requires auth)
/// /movies/{id}/rate       rate (PUT, requires auth)
///
/// /users/me               own profile with rated movies (requires auth)
/// /users/{id}             profile with rated movies (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/movies", movies::router())
        .nest("/users", users::router())
}
