use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{AppliedItem, AppliedListResponse, ApplicantsResponse, OpportunityWithApplicants,
          StatusUpdateRequest},
    repo,
    repo_types::ApplicationStatus,
};
use crate::{
    auth::{dto::MessageResponse, extractors::ApprovedUser},
    error::ApiError,
    opportunities::repo_types::Opportunity,
    state::AppState,
};

#[instrument(skip_all, fields(opportunity_id = %id))]
pub async fn apply(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let opportunity = Opportunity::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tutor opportunity not found"))?;

    let Some(application) = repo::insert(&state.db, opportunity.id, user.id).await? else {
        warn!(applicant = %user.id, "duplicate application");
        return Err(ApiError::conflict("You have already applied for this job"));
    };

    info!(application_id = %application.id, applicant = %user.id, "application submitted");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Application submitted".into(),
            success: true,
        }),
    ))
}

#[instrument(skip_all)]
pub async fn my_applications(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
) -> Result<Json<AppliedListResponse>, ApiError> {
    let rows = repo::list_by_applicant(&state.db, user.id).await?;
    if rows.is_empty() {
        return Err(ApiError::not_found("No applications found"));
    }
    Ok(Json(AppliedListResponse {
        application: rows.into_iter().map(AppliedItem::from).collect(),
        success: true,
    }))
}

#[instrument(skip_all, fields(opportunity_id = %id))]
pub async fn applicants(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicantsResponse>, ApiError> {
    let opportunity = Opportunity::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tutor opportunity not found"))?;

    if opportunity.created_by != user.id {
        return Err(ApiError::forbidden(
            "You are not authorized to view applicants for this job",
        ));
    }

    let applications = repo::list_for_opportunity(&state.db, opportunity.id).await?;
    Ok(Json(ApplicantsResponse {
        tutor_opportunity: OpportunityWithApplicants {
            id: opportunity.id,
            title: opportunity.title,
            tuition_type: opportunity.tuition_type,
            salary: opportunity.salary,
            location: opportunity.location,
            days_available: opportunity.days_available,
            requirements: opportunity.requirements,
            experience_level: opportunity.experience_level,
            created_at: opportunity.created_at,
            applications: applications.into_iter().map(Into::into).collect(),
        },
        success: true,
    }))
}

#[instrument(skip_all, fields(application_id = %id))]
pub async fn update_status(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let status = payload
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("status is required"))?;

    let status: ApplicationStatus = status.parse().map_err(|_| {
        ApiError::bad_request("Invalid status. Must be one of: pending, accepted, rejected")
    })?;

    let application = repo::find_with_owner(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Application not found."))?;

    if application.owner_id != user.id {
        return Err(ApiError::forbidden(
            "You are not authorized to update this application status",
        ));
    }

    // Re-applying the current status is a permitted no-op.
    repo::set_status(&state.db, application.id, status.as_str()).await?;
    info!(application_id = %application.id, status = %status, "application status updated");
    Ok(Json(MessageResponse {
        message: "Application status updated".into(),
        success: true,
    }))
}
