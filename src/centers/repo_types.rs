use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Tuition center record. `average_rating` and `total_ratings` are a
/// denormalized cache maintained by the rating aggregation workflow;
/// nothing else may write them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Center {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub logo_url: Option<String>,
    pub average_rating: f64,
    pub total_ratings: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub const CENTER_COLUMNS: &str = "id, name, user_id, description, website, location, logo_url, \
     average_rating, total_ratings, created_at";
