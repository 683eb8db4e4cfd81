use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::repo_types::{RateableCenter, Rating, RatingWithAuthor};

/// Eligibility: the tutor holds at least one accepted application whose
/// opportunity belongs to the center.
pub async fn has_accepted_application(
    db: &PgPool,
    tutor_id: Uuid,
    center_id: Uuid,
) -> anyhow::Result<bool> {
    let (eligible,): (bool,) = sqlx::query_as(
        "SELECT EXISTS ( \
            SELECT 1 FROM applications a \
            JOIN opportunities o ON o.id = a.opportunity_id \
            WHERE a.applicant_id = $1 AND a.status = 'accepted' AND o.center_id = $2)",
    )
    .bind(tutor_id)
    .bind(center_id)
    .fetch_one(db)
    .await?;
    Ok(eligible)
}

pub async fn find_by_center_and_tutor(
    db: &PgPool,
    center_id: Uuid,
    tutor_id: Uuid,
) -> anyhow::Result<Option<Rating>> {
    let rating = sqlx::query_as::<_, Rating>(
        "SELECT id, center_id, tutor_id, rating, comment, created_at, updated_at \
         FROM ratings WHERE center_id = $1 AND tutor_id = $2",
    )
    .bind(center_id)
    .bind(tutor_id)
    .fetch_optional(db)
    .await?;
    Ok(rating)
}

/// Locks the center row, serializing aggregate recomputation per center.
/// Returns false when the center does not exist.
pub async fn lock_center(
    tx: &mut Transaction<'_, Postgres>,
    center_id: Uuid,
) -> anyhow::Result<bool> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM centers WHERE id = $1 FOR UPDATE")
        .bind(center_id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row.is_some())
}

/// Upsert on the unique (center, tutor) pair: a re-submission overwrites
/// score and comment in place.
pub async fn upsert(
    tx: &mut Transaction<'_, Postgres>,
    center_id: Uuid,
    tutor_id: Uuid,
    rating: i32,
    comment: Option<&str>,
) -> anyhow::Result<Rating> {
    let rating = sqlx::query_as::<_, Rating>(
        "INSERT INTO ratings (center_id, tutor_id, rating, comment) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (center_id, tutor_id) DO UPDATE \
         SET rating = EXCLUDED.rating, comment = EXCLUDED.comment, updated_at = now() \
         RETURNING id, center_id, tutor_id, rating, comment, created_at, updated_at",
    )
    .bind(center_id)
    .bind(tutor_id)
    .bind(rating)
    .bind(comment)
    .fetch_one(&mut **tx)
    .await?;
    Ok(rating)
}

/// Mean and count over the center's ratings; `None` mean when there are
/// no ratings.
pub async fn aggregate(
    tx: &mut Transaction<'_, Postgres>,
    center_id: Uuid,
) -> anyhow::Result<(Option<f64>, i64)> {
    let row: (Option<f64>, i64) = sqlx::query_as(
        "SELECT AVG(rating)::float8, COUNT(*) FROM ratings WHERE center_id = $1",
    )
    .bind(center_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(row)
}

pub async fn set_center_aggregate(
    tx: &mut Transaction<'_, Postgres>,
    center_id: Uuid,
    average_rating: f64,
    total_ratings: i64,
) -> anyhow::Result<()> {
    sqlx::query("UPDATE centers SET average_rating = $2, total_ratings = $3 WHERE id = $1")
        .bind(center_id)
        .bind(average_rating)
        .bind(total_ratings)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn list_for_center(
    db: &PgPool,
    center_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<RatingWithAuthor>> {
    let rows = sqlx::query_as::<_, RatingWithAuthor>(
        "SELECT r.id, r.rating, r.comment, r.created_at, \
                u.id AS tutor_id, u.fullname AS tutor_fullname, u.photo_url AS tutor_photo_url \
         FROM ratings r \
         JOIN users u ON u.id = r.tutor_id \
         WHERE r.center_id = $1 \
         ORDER BY r.created_at DESC \
         LIMIT $2 OFFSET $3",
    )
    .bind(center_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn count_for_center(db: &PgPool, center_id: Uuid) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ratings WHERE center_id = $1")
        .bind(center_id)
        .fetch_one(db)
        .await?;
    Ok(count)
}

/// Unique centers where the tutor has an accepted application, each
/// annotated with the tutor's own rating if present.
pub async fn rateable_centers(db: &PgPool, tutor_id: Uuid) -> anyhow::Result<Vec<RateableCenter>> {
    let rows = sqlx::query_as::<_, RateableCenter>(
        "SELECT DISTINCT ON (c.id) \
                c.id, c.name, c.location, c.logo_url, c.average_rating, c.total_ratings, \
                (r.id IS NOT NULL) AS has_rated, r.rating AS user_rating \
         FROM applications a \
         JOIN opportunities o ON o.id = a.opportunity_id \
         JOIN centers c ON c.id = o.center_id \
         LEFT JOIN ratings r ON r.center_id = c.id AND r.tutor_id = $1 \
         WHERE a.applicant_id = $1 AND a.status = 'accepted' \
         ORDER BY c.id",
    )
    .bind(tutor_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
