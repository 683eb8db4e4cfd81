use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// One tutor's rating of one center. The (center, tutor) pair is unique at
/// the storage layer; submissions upsert in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub center_id: Uuid,
    pub tutor_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Rating joined with the author's public identity for center listings.
#[derive(Debug, FromRow)]
pub struct RatingWithAuthor {
    pub id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: OffsetDateTime,
    pub tutor_id: Uuid,
    pub tutor_fullname: String,
    pub tutor_photo_url: String,
}

/// A center the tutor is eligible to rate, annotated with any existing
/// rating of theirs.
#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateableCenter {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub logo_url: Option<String>,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub has_rated: bool,
    pub user_rating: Option<i32>,
}
