use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::OpportunityListRow;

/// `daysAvailable` and `requirements` arrive either as a comma-separated
/// string or as a JSON array, matching what the web client sends.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => s
                .split(',')
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect(),
            Self::Many(vs) => vs,
        }
    }
}

impl Default for StringOrList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOpportunityRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tuition_type: String,
    #[serde(default)]
    pub requirements: StringOrList,
    #[serde(default)]
    pub salary: i64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub days_available: StringOrList,
    #[serde(default)]
    pub experience: i32,
    pub tuition_center_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub sort_by: String,
    #[serde(default)]
    pub order: String,
}

/// Center fields embedded in opportunity listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterSummary {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub logo_url: Option<String>,
    pub average_rating: f64,
    pub total_ratings: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterIdentity {
    pub fullname: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityItem {
    pub id: Uuid,
    pub title: String,
    pub tuition_type: String,
    pub salary: i64,
    pub location: String,
    pub days_available: Vec<String>,
    pub requirements: Vec<String>,
    pub experience_level: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub tuition_center: CenterSummary,
    pub created_by: PosterIdentity,
}

impl From<OpportunityListRow> for OpportunityItem {
    fn from(r: OpportunityListRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            tuition_type: r.tuition_type,
            salary: r.salary,
            location: r.location,
            days_available: r.days_available,
            requirements: r.requirements,
            experience_level: r.experience_level,
            created_at: r.created_at,
            tuition_center: CenterSummary {
                id: r.center_id,
                name: r.center_name,
                location: r.center_location,
                logo_url: r.center_logo_url,
                average_rating: r.center_average_rating,
                total_ratings: r.center_total_ratings,
            },
            created_by: PosterIdentity {
                fullname: r.poster_fullname,
                email: r.poster_email,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicListResponse {
    pub tutor_opportunities: Vec<OpportunityItem>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListResponse {
    pub admin_tutor_opportunities: Vec<OpportunityItem>,
    pub success: bool,
}

/// Full detail: listing shape plus the expanded applications.
#[derive(Debug, Serialize)]
pub struct OpportunityDetail {
    #[serde(flatten)]
    pub item: OpportunityItem,
    pub applications: Vec<crate::applications::dto::ApplicantItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleOpportunityResponse {
    pub tutor_opportunity: OpportunityDetail,
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOpportunityResponse {
    pub message: String,
    pub tutor_opportunity: super::repo_types::Opportunity,
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::StringOrList;

    #[test]
    fn string_or_list_splits_commas() {
        let v: StringOrList = serde_json::from_str(r#""Mon, Tue,Wed""#).unwrap();
        assert_eq!(v.into_vec(), vec!["Mon", "Tue", "Wed"]);
    }

    #[test]
    fn string_or_list_accepts_arrays() {
        let v: StringOrList = serde_json::from_str(r#"["Mon","Tue"]"#).unwrap();
        assert_eq!(v.into_vec(), vec!["Mon", "Tue"]);
    }

    #[test]
    fn string_or_list_drops_empty_segments() {
        let v: StringOrList = serde_json::from_str(r#""BSc,,  ""#).unwrap();
        assert_eq!(v.into_vec(), vec!["BSc"]);
    }
}
