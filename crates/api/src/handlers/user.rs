//! Handlers for the `/users` resource: profile views with rated movies.

use axum::extract::{Path, State};
use axum::Json;
use reelrate_core::error::CoreError;
use reelrate_core::types::DbId;
use reelrate_db::models::rating::RatedMovie;
use reelrate_db::repositories::{RatingRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Public profile: identity plus every movie the user has rated.
#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    pub id: DbId,
    pub username: String,
    pub ratings: Vec<RatedMovie>,
}

/// GET /users/me
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserProfileResponse>> {
    build_profile(&state, auth_user.user_id).await
}

/// GET /users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserProfileResponse>> {
    build_profile(&state, id).await
}

/// Load the user and their rated-movie list.
async fn build_profile(state: &AppState, user_id: DbId) -> AppResult<Json<UserProfileResponse>> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let ratings = RatingRepo::list_with_movies_for_user(&state.pool, user_id).await?;

    Ok(Json(UserProfileResponse {
        id: user.id,
        username: user.username,
        ratings,
    }))
}
