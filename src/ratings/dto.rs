use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{RateableCenter, Rating, RatingWithAuthor};

#[derive(Debug, Deserialize)]
pub struct SubmitRatingRequest {
    #[serde(default)]
    pub rating: i64,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Page floors at 1, limit clamps into 1..=100.
    pub fn clamped(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(10).clamp(1, 100);
        (page, limit)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAuthor {
    pub id: Uuid,
    pub fullname: String,
    pub profile_photo: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingItem {
    pub id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub tutor: RatingAuthor,
}

impl From<RatingWithAuthor> for RatingItem {
    fn from(row: RatingWithAuthor) -> Self {
        Self {
            id: row.id,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
            tutor: RatingAuthor {
                id: row.tutor_id,
                fullname: row.tutor_fullname,
                profile_photo: row.tutor_photo_url,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterRatingsResponse {
    pub ratings: Vec<RatingItem>,
    pub total_ratings: i64,
    pub current_page: i64,
    pub total_pages: i64,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct MyRatingResponse {
    pub rating: Option<Rating>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateableResponse {
    pub tuition_centers: Vec<RateableCenter>,
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_out_of_range_values() {
        let p = Pagination { page: Some(0), limit: Some(500) };
        assert_eq!(p.clamped(), (1, 100));
        let p = Pagination { page: Some(-3), limit: Some(0) };
        assert_eq!(p.clamped(), (1, 1));
    }

    #[test]
    fn pagination_defaults_to_first_page_of_ten() {
        let p = Pagination { page: None, limit: None };
        assert_eq!(p.clamped(), (1, 10));
    }
}
