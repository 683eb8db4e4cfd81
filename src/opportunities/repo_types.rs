use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A posted tutoring job, owned by its creator and linked to one center.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: Uuid,
    pub title: String,
    pub tuition_type: String,
    pub salary: i64,
    pub location: String,
    pub days_available: Vec<String>,
    pub requirements: Vec<String>,
    pub experience_level: i32,
    pub center_id: Uuid,
    pub created_by: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub const OPPORTUNITY_COLUMNS: &str = "id, title, tuition_type, salary, location, days_available, \
     requirements, experience_level, center_id, created_by, created_at";

/// Opportunity joined with its center summary and the poster's identity,
/// the shape of the public and admin listings.
#[derive(Debug, FromRow)]
pub struct OpportunityListRow {
    pub id: Uuid,
    pub title: String,
    pub tuition_type: String,
    pub salary: i64,
    pub location: String,
    pub days_available: Vec<String>,
    pub requirements: Vec<String>,
    pub experience_level: i32,
    pub center_id: Uuid,
    pub created_by: Uuid,
    pub created_at: OffsetDateTime,
    pub center_name: String,
    pub center_location: Option<String>,
    pub center_logo_url: Option<String>,
    pub center_average_rating: f64,
    pub center_total_ratings: i64,
    pub poster_fullname: String,
    pub poster_email: String,
}
