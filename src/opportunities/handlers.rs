use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{
        AdminListResponse, ListQuery, OpportunityDetail, OpportunityItem, PostOpportunityRequest,
        PostOpportunityResponse, PublicListResponse, SingleOpportunityResponse,
    },
    repo,
    repo_types::Opportunity,
};
use crate::{
    applications,
    auth::{dto::MessageResponse, extractors::ApprovedUser, repo_types::User},
    centers::repo_types::Center,
    error::ApiError,
    state::AppState,
    validation::{validate_opportunity, OpportunityInput},
};

struct ValidatedPosting {
    title: String,
    tuition_type: String,
    salary: i64,
    location: String,
    days_available: Vec<String>,
    requirements: Vec<String>,
    experience_level: i32,
    center_id: Uuid,
}

/// Shared field validation and center checks for posting and updating.
async fn validate_posting(
    state: &AppState,
    user: &User,
    payload: PostOpportunityRequest,
) -> Result<ValidatedPosting, ApiError> {
    let requirements = payload.requirements.into_vec();
    let days_available = payload.days_available.into_vec();

    let errors = validate_opportunity(&OpportunityInput {
        title: &payload.title,
        tuition_type: &payload.tuition_type,
        location: &payload.location,
        salary: payload.salary,
        experience_level: payload.experience,
        requirements: &requirements,
    });
    if let Some(first) = errors.into_iter().next() {
        return Err(ApiError::bad_request(first));
    }
    if days_available.is_empty() {
        return Err(ApiError::bad_request("Days available are required"));
    }
    let Some(center_id) = payload.tuition_center_id else {
        return Err(ApiError::bad_request("Tuition center is required"));
    };

    let center = Center::find_by_id(&state.db, center_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tuition center not found"))?;
    if center.user_id != user.id {
        return Err(ApiError::forbidden(
            "You can only assign jobs to your own tuition centers",
        ));
    }
    if center.logo_url.is_none() {
        return Err(ApiError::bad_request(
            "Tuition center must have a logo before posting a job.",
        ));
    }

    Ok(ValidatedPosting {
        title: payload.title.trim().to_string(),
        tuition_type: payload.tuition_type,
        salary: payload.salary,
        location: payload.location,
        days_available,
        requirements,
        experience_level: payload.experience,
        center_id: center.id,
    })
}

#[instrument(skip(state))]
pub async fn list_public(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<PublicListResponse>, ApiError> {
    let rows = repo::list_public(&state.db, &q.keyword, &q.sort_by, &q.order).await?;
    Ok(Json(PublicListResponse {
        tutor_opportunities: rows.into_iter().map(OpportunityItem::from).collect(),
        success: true,
    }))
}

#[instrument(skip_all)]
pub async fn post_opportunity(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Json(payload): Json<PostOpportunityRequest>,
) -> Result<(StatusCode, Json<PostOpportunityResponse>), ApiError> {
    let posting = validate_posting(&state, &user, payload).await?;

    let opportunity = Opportunity::create(
        &state.db,
        &posting.title,
        &posting.tuition_type,
        posting.salary,
        &posting.location,
        &posting.days_available,
        &posting.requirements,
        posting.experience_level,
        posting.center_id,
        user.id,
    )
    .await?;

    info!(opportunity_id = %opportunity.id, owner = %user.id, "opportunity posted");
    Ok((
        StatusCode::CREATED,
        Json(PostOpportunityResponse {
            message: "Tutor opportunity posted successfully.".into(),
            tutor_opportunity: opportunity,
            success: true,
        }),
    ))
}

#[instrument(skip_all)]
pub async fn list_admin(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
) -> Result<Json<AdminListResponse>, ApiError> {
    let rows = repo::list_by_creator(&state.db, user.id).await?;
    Ok(Json(AdminListResponse {
        admin_tutor_opportunities: rows.into_iter().map(OpportunityItem::from).collect(),
        success: true,
    }))
}

async fn detail(state: &AppState, id: Uuid) -> Result<Option<OpportunityDetail>, ApiError> {
    let Some(row) = repo::find_list_row(&state.db, id).await? else {
        return Ok(None);
    };
    let applications = applications::repo::list_for_opportunity(&state.db, id).await?;
    Ok(Some(OpportunityDetail {
        item: OpportunityItem::from(row),
        applications: applications.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip(state))]
pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SingleOpportunityResponse>, ApiError> {
    let detail = detail(&state, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tutor opportunity not found"))?;
    Ok(Json(SingleOpportunityResponse {
        tutor_opportunity: detail,
        success: true,
    }))
}

#[instrument(skip_all, fields(opportunity_id = %id))]
pub async fn get_admin(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SingleOpportunityResponse>, ApiError> {
    let opportunity = Opportunity::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tutor opportunity not found"))?;
    if opportunity.created_by != user.id {
        return Err(ApiError::forbidden(
            "You are not authorized to access this tutor opportunity",
        ));
    }
    let detail = detail(&state, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tutor opportunity not found"))?;
    Ok(Json(SingleOpportunityResponse {
        tutor_opportunity: detail,
        success: true,
    }))
}

#[instrument(skip_all, fields(opportunity_id = %id))]
pub async fn update_opportunity(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostOpportunityRequest>,
) -> Result<Json<PostOpportunityResponse>, ApiError> {
    let mut opportunity = Opportunity::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tutor opportunity not found"))?;
    if opportunity.created_by != user.id {
        return Err(ApiError::forbidden(
            "You are not authorized to update this tutor opportunity",
        ));
    }

    let posting = validate_posting(&state, &user, payload).await?;
    opportunity.title = posting.title;
    opportunity.tuition_type = posting.tuition_type;
    opportunity.salary = posting.salary;
    opportunity.location = posting.location;
    opportunity.days_available = posting.days_available;
    opportunity.requirements = posting.requirements;
    opportunity.experience_level = posting.experience_level;
    opportunity.center_id = posting.center_id;

    let opportunity = opportunity.save(&state.db).await?;
    info!(opportunity_id = %opportunity.id, "opportunity updated");
    Ok(Json(PostOpportunityResponse {
        message: "Tutor opportunity updated successfully.".into(),
        tutor_opportunity: opportunity,
        success: true,
    }))
}

#[instrument(skip_all, fields(opportunity_id = %id))]
pub async fn delete_opportunity(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let opportunity = Opportunity::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tutor opportunity not found"))?;
    if opportunity.created_by != user.id {
        return Err(ApiError::forbidden(
            "You are not authorized to delete this tutor opportunity",
        ));
    }

    // applications cascade with the opportunity
    Opportunity::delete(&state.db, opportunity.id).await?;
    info!(opportunity_id = %opportunity.id, "opportunity deleted");
    Ok(Json(MessageResponse {
        message: "Tutor opportunity and associated applications deleted successfully".into(),
        success: true,
    }))
}
