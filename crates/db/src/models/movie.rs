//! Movie entity model and DTOs.

use reelrate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full movie row from the `movies` table.
///
/// `avg_rating_score` and `rating_count` are derived columns maintained by
/// [`RatingRepo::rate`](crate::repositories::RatingRepo::rate); they always
/// reflect the movie's current rating rows.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub release_year: i32,
    pub genre: String,
    pub avg_rating_score: Option<f64>,
    pub rating_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new movie.
#[derive(Debug, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub description: Option<String>,
    pub release_year: i32,
    pub genre: String,
}

/// DTO for updating an existing movie. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub genre: Option<String>,
}
