use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CenterListResponse, CenterResponse, RegisterCenterRequest, SingleCenterResponse},
    repo_types::Center,
};
use crate::{
    auth::{dto::MessageResponse, extractors::ApprovedUser, repo_types::User},
    error::ApiError,
    state::AppState,
    storage::ext_from_mime,
};

/// Loads a center and checks the caller owns it.
async fn owned_center(
    state: &AppState,
    center_id: Uuid,
    user: &User,
    action: &str,
) -> Result<Center, ApiError> {
    let center = Center::find_by_id(&state.db, center_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tuition center not found"))?;
    if center.user_id != user.id {
        return Err(ApiError::forbidden(format!(
            "You are not authorized to {action} this tuition center"
        )));
    }
    Ok(center)
}

#[instrument(skip_all)]
pub async fn register_center(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Json(payload): Json<RegisterCenterRequest>,
) -> Result<(StatusCode, Json<CenterResponse>), ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Tuition center name is required"));
    }
    if Center::find_by_name(&state.db, name).await?.is_some() {
        return Err(ApiError::conflict("Tuition center already exists"));
    }

    let center = Center::create(&state.db, name, user.id)
        .await
        .map_err(ApiError::from)?;
    info!(center_id = %center.id, owner = %user.id, "center registered");
    Ok((
        StatusCode::CREATED,
        Json(CenterResponse {
            message: "Tuition center registered successfully.".into(),
            center,
            success: true,
        }),
    ))
}

#[instrument(skip_all)]
pub async fn list_my_centers(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
) -> Result<Json<CenterListResponse>, ApiError> {
    let centers = Center::list_by_user(&state.db, user.id).await?;
    Ok(Json(CenterListResponse {
        centers,
        success: true,
    }))
}

#[instrument(skip_all, fields(center_id = %id))]
pub async fn get_center(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SingleCenterResponse>, ApiError> {
    let center = owned_center(&state, id, &user, "access").await?;
    Ok(Json(SingleCenterResponse {
        center,
        success: true,
    }))
}

#[instrument(skip_all, fields(center_id = %id))]
pub async fn update_center(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
    mut mp: Multipart,
) -> Result<Json<CenterResponse>, ApiError> {
    let mut center = owned_center(&state, id, &user, "update").await?;

    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Malformed multipart body"))?
    {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };
        if name == "file" {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".into());
            let bytes = field
                .bytes()
                .await
                .map_err(|_| ApiError::bad_request("Malformed multipart body"))?;
            let key = format!(
                "logos/{}/{}.{}",
                center.id,
                Uuid::new_v4(),
                ext_from_mime(&content_type)
            );
            state.storage.put_object(&key, bytes, &content_type).await?;
            center.logo_url = Some(state.storage.public_url(&key));
        } else {
            let value = field
                .text()
                .await
                .map_err(|_| ApiError::bad_request("Malformed multipart body"))?;
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match name.as_str() {
                "name" => center.name = value.to_string(),
                "description" => center.description = Some(value.to_string()),
                "website" => center.website = Some(value.to_string()),
                "location" => center.location = Some(value.to_string()),
                _ => {}
            }
        }
    }

    let center = center.save_details(&state.db).await.map_err(ApiError::from)?;
    info!(center_id = %center.id, "center updated");
    Ok(Json(CenterResponse {
        message: "Tuition center updated".into(),
        center,
        success: true,
    }))
}

#[instrument(skip_all, fields(center_id = %id))]
pub async fn delete_center(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let center = owned_center(&state, id, &user, "delete").await?;
    Center::delete(&state.db, center.id).await?;
    info!(center_id = %center.id, "center deleted with cascade");
    Ok(Json(MessageResponse {
        message: "Tuition center, associated jobs, and applications deleted successfully".into(),
        success: true,
    }))
}
