//! Rating entity model and profile view types.

use reelrate_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::movie::Movie;

/// Full rating row from the `ratings` table.
///
/// At most one row exists per (user_id, movie_id) pair; re-rating updates
/// the existing row in place.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Rating {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub score: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One entry in a user's profile: the score given plus a snapshot of the
/// rated movie including its current aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct RatedMovie {
    pub score: i32,
    pub created_at: Timestamp,
    pub movie: Movie,
}

/// Flat join row used internally to build [`RatedMovie`].
#[derive(Debug, FromRow)]
pub(crate) struct RatedMovieRow {
    pub score: i32,
    pub rated_at: Timestamp,
    pub movie_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub release_year: i32,
    pub genre: String,
    pub avg_rating_score: Option<f64>,
    pub rating_count: i32,
    pub movie_created_at: Timestamp,
    pub movie_updated_at: Timestamp,
}

impl From<RatedMovieRow> for RatedMovie {
    fn from(row: RatedMovieRow) -> Self {
        Self {
            score: row.score,
            created_at: row.rated_at,
            movie: Movie {
                id: row.movie_id,
                title: row.title,
                description: row.description,
                release_year: row.release_year,
                genre: row.genre,
                avg_rating_score: row.avg_rating_score,
                rating_count: row.rating_count,
                created_at: row.movie_created_at,
                updated_at: row.movie_updated_at,
            },
        }
    }
}
