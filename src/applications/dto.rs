use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{ApplicationWithApplicant, AppliedRow};
use crate::opportunities::dto::CenterSummary;

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

/// Opportunity as seen from an application listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedOpportunity {
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
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedItem {
    pub id: Uuid,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub tutor_opportunity: AppliedOpportunity,
}

impl From<AppliedRow> for AppliedItem {
    fn from(r: AppliedRow) -> Self {
        Self {
            id: r.id,
            status: r.status,
            created_at: r.created_at,
            tutor_opportunity: AppliedOpportunity {
                id: r.opportunity_id,
                title: r.title,
                tuition_type: r.tuition_type,
                salary: r.salary,
                location: r.location,
                days_available: r.days_available,
                requirements: r.requirements,
                experience_level: r.experience_level,
                created_at: r.opportunity_created_at,
                tuition_center: CenterSummary {
                    id: r.center_id,
                    name: r.center_name,
                    location: r.center_location,
                    logo_url: r.center_logo_url,
                    average_rating: r.center_average_rating,
                    total_ratings: r.center_total_ratings,
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AppliedListResponse {
    pub application: Vec<AppliedItem>,
    pub success: bool,
}

/// Applicant identity exposed to the opportunity owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantIdentity {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub profile_photo: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantItem {
    pub id: Uuid,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub applicant: ApplicantIdentity,
}

impl From<ApplicationWithApplicant> for ApplicantItem {
    fn from(r: ApplicationWithApplicant) -> Self {
        Self {
            id: r.id,
            status: r.status,
            created_at: r.created_at,
            applicant: ApplicantIdentity {
                id: r.applicant_id,
                fullname: r.applicant_fullname,
                email: r.applicant_email,
                phone_number: r.applicant_phone_number,
                profile_photo: r.applicant_photo_url,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityWithApplicants {
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
    pub applications: Vec<ApplicantItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantsResponse {
    pub tutor_opportunity: OpportunityWithApplicants,
    pub success: bool,
}
