//! Rating score validation and aggregate arithmetic.
//!
//! The database stores a denormalized `avg_rating_score` / `rating_count`
//! pair on every movie. [`RatingAggregate`] defines what those fields must
//! equal for a given set of rating rows; the DB layer recomputes it in SQL
//! and the tests cross-check against [`compute_aggregate`].

use crate::error::CoreError;

/// Lowest accepted rating score.
pub const MIN_SCORE: i32 = 1;

/// Highest accepted rating score.
pub const MAX_SCORE: i32 = 10;

/// Denormalized aggregate of all ratings for one movie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingAggregate {
    /// Number of rating rows for the movie.
    pub count: i64,
    /// Arithmetic mean of the scores, `None` when there are no ratings.
    pub average: Option<f64>,
}

/// Validate that a score is an integer in `[MIN_SCORE, MAX_SCORE]`.
///
/// Called before any write so an out-of-range score never reaches storage.
pub fn validate_score(score: i32) -> Result<(), CoreError> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(CoreError::Validation(format!(
            "Score must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"
        )));
    }
    Ok(())
}

/// Compute the aggregate for a set of scores.
///
/// The average is `None` exactly when `scores` is empty; a mean is never
/// computed over zero ratings.
pub fn compute_aggregate(scores: &[i32]) -> RatingAggregate {
    if scores.is_empty() {
        return RatingAggregate {
            count: 0,
            average: None,
        };
    }
    let sum: i64 = scores.iter().map(|&s| s as i64).sum();
    RatingAggregate {
        count: scores.len() as i64,
        average: Some(sum as f64 / scores.len() as f64),
    }
}
