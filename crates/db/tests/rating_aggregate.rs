//! Integration tests for the rating upsert-and-recompute unit.

use reelrate_core::rating::compute_aggregate;
use reelrate_db::models::movie::{CreateMovie, Movie};
use reelrate_db::models::user::{CreateUser, User};
use reelrate_db::repositories::{MovieRepo, RatingRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_test_user(pool: &PgPool, name: &str) -> User {
    let input = CreateUser {
        username: name.to_string(),
        email: format!("{name}@test.com"),
        password_hash: "$argon2id$fake-hash-for-tests".to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

async fn create_test_movie(pool: &PgPool, title: &str) -> Movie {
    let input = CreateMovie {
        title: title.to_string(),
        description: Some("A movie used in tests".to_string()),
        release_year: 1999,
        genre: "Sci-Fi".to_string(),
    };
    MovieRepo::create(pool, &input)
        .await
        .expect("movie creation should succeed")
}

async fn fetch_movie(pool: &PgPool, id: i64) -> Movie {
    MovieRepo::find_by_id(pool, id)
        .await
        .expect("movie lookup should succeed")
        .expect("movie should exist")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// A new movie has no aggregate: count 0, average NULL.
#[sqlx::test(migrations = "../../db/migrations")]
async fn new_movie_has_empty_aggregate(pool: PgPool) {
    let movie = create_test_movie(&pool, "Unrated").await;

    assert_eq!(movie.rating_count, 0);
    assert_eq!(movie.avg_rating_score, None);
}

/// Repeated rate calls by the same user never create a second row; the
/// stored score is always the most recent one.
#[sqlx::test(migrations = "../../db/migrations")]
async fn rerate_updates_in_place(pool: PgPool) {
    let user = create_test_user(&pool, "alice").await;
    let movie = create_test_movie(&pool, "The Matrix").await;

    let first = RatingRepo::rate(&pool, user.id, movie.id, 8)
        .await
        .unwrap()
        .expect("movie exists");
    assert_eq!(first.score, 8);

    let second = RatingRepo::rate(&pool, user.id, movie.id, 3)
        .await
        .unwrap()
        .expect("movie exists");
    assert_eq!(second.id, first.id, "re-rating must update the same row");
    assert_eq!(second.score, 3);
    assert!(second.updated_at >= first.updated_at);

    let stored = RatingRepo::find_by_user_and_movie(&pool, user.id, movie.id)
        .await
        .unwrap()
        .expect("rating should exist");
    assert_eq!(stored.id, first.id, "lookup must find the original row");
    assert_eq!(stored.score, 3, "lookup must see the latest score");
}

/// The denormalized columns track the rating rows through the full
/// first-rate / second-rate / re-rate scenario.
#[sqlx::test(migrations = "../../db/migrations")]
async fn aggregate_follows_rating_changes(pool: PgPool) {
    let alice = create_test_user(&pool, "alice").await;
    let bob = create_test_user(&pool, "bob").await;
    let movie = create_test_movie(&pool, "Heat").await;

    // Alice rates 8.
    RatingRepo::rate(&pool, alice.id, movie.id, 8)
        .await
        .unwrap()
        .unwrap();
    let m = fetch_movie(&pool, movie.id).await;
    assert_eq!(m.rating_count, 1);
    assert_eq!(m.avg_rating_score, Some(8.0));

    // Bob rates 6.
    RatingRepo::rate(&pool, bob.id, movie.id, 6)
        .await
        .unwrap()
        .unwrap();
    let m = fetch_movie(&pool, movie.id).await;
    assert_eq!(m.rating_count, 2);
    assert_eq!(m.avg_rating_score, Some(7.0));

    // Alice re-rates with 10: count stays 2, average becomes 8.
    RatingRepo::rate(&pool, alice.id, movie.id, 10)
        .await
        .unwrap()
        .unwrap();
    let m = fetch_movie(&pool, movie.id).await;
    assert_eq!(m.rating_count, 2);
    assert_eq!(m.avg_rating_score, Some(8.0));

    // Cross-check the SQL recompute against the pure definition.
    let expected = compute_aggregate(&[10, 6]);
    assert_eq!(m.rating_count as i64, expected.count);
    assert_eq!(m.avg_rating_score, expected.average);
}

/// Re-rating with the same score leaves the aggregate unchanged but still
/// refreshes updated_at.
#[sqlx::test(migrations = "../../db/migrations")]
async fn same_score_rerate_is_aggregate_idempotent(pool: PgPool) {
    let user = create_test_user(&pool, "carol").await;
    let movie = create_test_movie(&pool, "Alien").await;

    let first = RatingRepo::rate(&pool, user.id, movie.id, 7)
        .await
        .unwrap()
        .unwrap();
    let before = fetch_movie(&pool, movie.id).await;

    let second = RatingRepo::rate(&pool, user.id, movie.id, 7)
        .await
        .unwrap()
        .unwrap();
    let after = fetch_movie(&pool, movie.id).await;

    assert_eq!(before.rating_count, after.rating_count);
    assert_eq!(before.avg_rating_score, after.avg_rating_score);
    assert!(second.updated_at >= first.updated_at);
}

/// Rating a nonexistent movie writes nothing at all.
#[sqlx::test(migrations = "../../db/migrations")]
async fn rating_missing_movie_writes_nothing(pool: PgPool) {
    let user = create_test_user(&pool, "dave").await;

    let result = RatingRepo::rate(&pool, user.id, 9999, 5).await.unwrap();
    assert!(result.is_none(), "missing movie must yield no rating");

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ratings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0, "no rating row may be created");
}

/// Concurrent rate calls for one movie serialize on the movie row lock:
/// whatever order they commit in, the last recompute sees every committed
/// row, so the final aggregate covers all four scores.
#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_ratings_converge_on_full_aggregate(pool: PgPool) {
    let movie = create_test_movie(&pool, "Ronin").await;
    let gina = create_test_user(&pool, "gina").await;
    let hugo = create_test_user(&pool, "hugo").await;
    let iris = create_test_user(&pool, "iris").await;
    let jack = create_test_user(&pool, "jack").await;

    let (a, b, c, d) = tokio::join!(
        RatingRepo::rate(&pool, gina.id, movie.id, 4),
        RatingRepo::rate(&pool, hugo.id, movie.id, 6),
        RatingRepo::rate(&pool, iris.id, movie.id, 8),
        RatingRepo::rate(&pool, jack.id, movie.id, 10),
    );
    for result in [a, b, c, d] {
        result.unwrap().expect("movie exists");
    }

    let m = fetch_movie(&pool, movie.id).await;
    let expected = compute_aggregate(&[4, 6, 8, 10]);
    assert_eq!(m.rating_count as i64, expected.count);
    assert_eq!(m.avg_rating_score, expected.average);
}

/// Ratings of different movies do not affect each other's aggregates.
#[sqlx::test(migrations = "../../db/migrations")]
async fn aggregates_are_per_movie(pool: PgPool) {
    let user = create_test_user(&pool, "erin").await;
    let first = create_test_movie(&pool, "Movie A").await;
    let second = create_test_movie(&pool, "Movie B").await;

    RatingRepo::rate(&pool, user.id, first.id, 10)
        .await
        .unwrap()
        .unwrap();

    let untouched = fetch_movie(&pool, second.id).await;
    assert_eq!(untouched.rating_count, 0);
    assert_eq!(untouched.avg_rating_score, None);
}

/// The profile join returns the score plus the movie snapshot with current
/// aggregates, newest rating first.
#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_listing_joins_movies(pool: PgPool) {
    let user = create_test_user(&pool, "frank").await;
    let movie = create_test_movie(&pool, "Blade Runner").await;

    RatingRepo::rate(&pool, user.id, movie.id, 9)
        .await
        .unwrap()
        .unwrap();

    let rated = RatingRepo::list_with_movies_for_user(&pool, user.id)
        .await
        .unwrap();
    assert_eq!(rated.len(), 1);
    assert_eq!(rated[0].score, 9);
    assert_eq!(rated[0].movie.id, movie.id);
    assert_eq!(rated[0].movie.title, "Blade Runner");
    assert_eq!(rated[0].movie.rating_count, 1);
    assert_eq!(rated[0].movie.avg_rating_score, Some(9.0));
}
