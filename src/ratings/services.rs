use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::repo;
use crate::error::ApiError;

/// Round half-up at the 0.1 boundary.
pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Submit or overwrite a tutor's rating of a center and recompute the
/// denormalized aggregate. The whole flow runs in one transaction with the
/// center row locked, so recomputation is serialized per center and the
/// aggregate can never be based on a stale read.
pub async fn submit_rating(
    db: &PgPool,
    center_id: Uuid,
    tutor_id: Uuid,
    score: i32,
    comment: Option<&str>,
) -> Result<(), ApiError> {
    let mut tx = db.begin().await.map_err(anyhow::Error::from)?;

    if !repo::lock_center(&mut tx, center_id).await? {
        return Err(ApiError::not_found("Tuition center not found"));
    }

    if !repo::has_accepted_application(db, tutor_id, center_id).await? {
        return Err(ApiError::forbidden(
            "You can only rate tuition centers where you have been accepted as a tutor",
        ));
    }

    let rating = repo::upsert(&mut tx, center_id, tutor_id, score, comment).await?;
    recompute_aggregate(&mut tx, center_id).await?;

    tx.commit().await.map_err(anyhow::Error::from)?;
    info!(rating_id = %rating.id, %center_id, %tutor_id, score, "rating submitted");
    Ok(())
}

/// Full recomputation from the ratings table: zero ratings resets the
/// aggregate to (0, 0). Caller must hold the center row lock.
pub async fn recompute_aggregate(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    center_id: Uuid,
) -> Result<(), ApiError> {
    let (mean, count) = repo::aggregate(tx, center_id).await?;
    let average = match mean {
        Some(m) if count > 0 => round_to_one_decimal(m),
        _ => 0.0,
    };
    repo::set_center_aggregate(tx, center_id, average, count).await?;
    Ok(())
}

pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up_at_tenth_boundary() {
        assert_eq!(round_to_one_decimal(4.45), 4.5);
        assert_eq!(round_to_one_decimal(4.25), 4.3);
        assert_eq!(round_to_one_decimal(3.0), 3.0);
        assert_eq!(round_to_one_decimal(4.44), 4.4);
    }

    #[test]
    fn mean_of_four_and_five_is_four_point_five() {
        let mean = (4.0 + 5.0) / 2.0;
        assert_eq!(round_to_one_decimal(mean), 4.5);
    }

    #[test]
    fn thirds_round_to_one_decimal() {
        // {3, 4, 5, 5} -> 4.25 -> 4.3
        let mean = (3.0 + 4.0 + 5.0 + 5.0) / 4.0;
        assert_eq!(round_to_one_decimal(mean), 4.3);
        // {2, 3, 3} -> 2.666... -> 2.7
        let mean = (2.0 + 3.0 + 3.0) / 3.0;
        assert_eq!(round_to_one_decimal(mean), 2.7);
    }

    #[test]
    fn total_pages_ceils() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }
}
