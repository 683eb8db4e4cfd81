use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{
        CenterRatingsResponse, MyRatingResponse, Pagination, RateableResponse, RatingItem,
        SubmitRatingRequest,
    },
    repo, services,
};
use crate::{
    auth::{dto::MessageResponse, extractors::AuthUser},
    error::ApiError,
    state::AppState,
};

const MAX_COMMENT_LEN: usize = 500;

#[instrument(skip_all, fields(center_id = %id))]
pub async fn submit_rating(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<SubmitRatingRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if body.rating < 1 || body.rating > 5 {
        return Err(ApiError::bad_request("Rating must be between 1 and 5"));
    }
    let comment = body
        .comment
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    if comment.map_or(false, |c| c.chars().count() > MAX_COMMENT_LEN) {
        return Err(ApiError::bad_request(
            "Comment must be at most 500 characters",
        ));
    }

    services::submit_rating(&state.db, id, user_id, body.rating as i32, comment).await?;
    Ok(Json(MessageResponse {
        message: "Rating submitted successfully".into(),
        success: true,
    }))
}

#[instrument(skip_all, fields(center_id = %id))]
pub async fn center_ratings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<CenterRatingsResponse>, ApiError> {
    let (page, limit) = pagination.clamped();
    let total = repo::count_for_center(&state.db, id).await?;
    let rows = repo::list_for_center(&state.db, id, limit, (page - 1) * limit).await?;
    Ok(Json(CenterRatingsResponse {
        ratings: rows.into_iter().map(RatingItem::from).collect(),
        total_ratings: total,
        current_page: page,
        total_pages: services::total_pages(total, limit),
        success: true,
    }))
}

/// The caller's own rating of the center, null when they have not rated it.
#[instrument(skip_all, fields(center_id = %id))]
pub async fn my_rating(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MyRatingResponse>, ApiError> {
    let rating = repo::find_by_center_and_tutor(&state.db, id, user_id).await?;
    Ok(Json(MyRatingResponse {
        rating,
        success: true,
    }))
}

#[instrument(skip_all)]
pub async fn rateable_centers(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<RateableResponse>, ApiError> {
    let centers = repo::rateable_centers(&state.db, user_id).await?;
    info!(tutor = %user_id, count = centers.len(), "rateable centers listed");
    Ok(Json(RateableResponse {
        tuition_centers: centers,
        success: true,
    }))
}
