//! Repository for the `ratings` table and the per-movie aggregate columns.

use reelrate_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::{RatedMovie, RatedMovieRow, Rating};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, movie_id, score, created_at, updated_at";

/// Provides the rating upsert-and-recompute unit and profile queries.
pub struct RatingRepo;

impl RatingRepo {
    /// Record `score` for (`user_id`, `movie_id`) and bring the movie's
    /// aggregate columns in line with its rating rows.
    ///
    /// Runs as a single transaction serialized per movie: the movie row is
    /// locked with `SELECT ... FOR UPDATE` (which doubles as the existence
    /// check), the rating is upserted on the (user_id, movie_id) unique
    /// key, and the count/average are recomputed from all rating rows of
    /// the movie before both aggregate columns are written back. Either
    /// every write commits or none does, so a reader never observes an
    /// upsert without its recompute. Ratings of other movies do not
    /// contend on the lock.
    ///
    /// Returns `None` without writing anything if the movie does not exist.
    pub async fn rate(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
        score: i32,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the movie row for the duration of upsert + recompute.
        let movie_exists: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM movies WHERE id = $1 FOR UPDATE")
                .bind(movie_id)
                .fetch_optional(&mut *tx)
                .await?;

        if movie_exists.is_none() {
            return Ok(None);
        }

        // Upsert keyed by the (user_id, movie_id) unique constraint.
        let query = format!(
            "INSERT INTO ratings (user_id, movie_id, score)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_ratings_user_movie
             DO UPDATE SET score = EXCLUDED.score, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        let rating = sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(movie_id)
            .bind(score)
            .fetch_one(&mut *tx)
            .await?;

        // Recompute the denormalized aggregates from the post-upsert rows.
        sqlx::query(
            "UPDATE movies SET
                avg_rating_score = agg.avg_score,
                rating_count = agg.score_count,
                updated_at = NOW()
             FROM (
                SELECT AVG(score)::DOUBLE PRECISION AS avg_score,
                       COUNT(*)::INT AS score_count
                FROM ratings WHERE movie_id = $1
             ) AS agg
             WHERE movies.id = $1",
        )
        .bind(movie_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(rating))
    }

    /// Find a user's rating for a movie, if any.
    pub async fn find_by_user_and_movie(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ratings WHERE user_id = $1 AND movie_id = $2");
        sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's ratings joined with the rated movies, newest first.
    ///
    /// Feeds the profile endpoints; the movie snapshot carries the current
    /// aggregate columns.
    pub async fn list_with_movies_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RatedMovie>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RatedMovieRow>(
            "SELECT r.score,
                    r.created_at AS rated_at,
                    m.id AS movie_id,
                    m.title,
                    m.description,
                    m.release_year,
                    m.genre,
                    m.avg_rating_score,
                    m.rating_count,
                    m.created_at AS movie_created_at,
                    m.updated_at AS movie_updated_at
             FROM ratings r
             JOIN movies m ON m.id = r.movie_id
             WHERE r.user_id = $1
             ORDER BY r.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(RatedMovie::from).collect())
    }
}
