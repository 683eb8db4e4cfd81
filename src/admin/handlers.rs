use axum::{
    extract::{FromRef, Path, Query, State},
    http::HeaderMap,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{StatsResponse, SuperAdminLoginRequest, UserListQuery, UserListResponse},
    repo,
};
use crate::{
    auth::{
        dto::{LoginResponse, MessageResponse, PublicUser},
        extractors::SuperAdminUser,
        jwt::JwtKeys,
        password::hash_password,
        repo_types::{User, STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED},
    },
    error::ApiError,
    state::AppState,
};

fn cookie_headers(token: &str, max_age_secs: u64) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = format!("token={token}; Max-Age={max_age_secs}; Path=/; HttpOnly; SameSite=Lax");
    headers.insert(axum::http::header::SET_COOKIE, value.parse()?);
    Ok(headers)
}

#[instrument(skip_all)]
pub async fn super_admin_login(
    State(state): State<AppState>,
    Json(payload): Json<SuperAdminLoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let cfg = &state.config.superadmin;
    if payload.email != cfg.email || payload.password != cfg.password {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let password_hash = hash_password(&cfg.password)?;
    let admin = User::ensure_super_admin(
        &state.db,
        "Super Admin",
        &cfg.email,
        "0000000000",
        &password_hash,
    )
    .await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(admin.id)?;
    let headers = cookie_headers(&token, keys.ttl.as_secs())?;

    info!(user_id = %admin.id, "superadmin logged in");
    Ok((
        headers,
        Json(LoginResponse {
            message: "SuperAdmin logged in successfully".into(),
            user: PublicUser::from(admin),
            token,
            success: true,
        }),
    ))
}

#[instrument(skip_all)]
pub async fn pending_users(
    State(state): State<AppState>,
    SuperAdminUser(_): SuperAdminUser,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = repo::list_users(&state.db, Some(STATUS_PENDING)).await?;
    Ok(Json(UserListResponse {
        users: users.into_iter().map(PublicUser::from).collect(),
        success: true,
    }))
}

#[instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    SuperAdminUser(_): SuperAdminUser,
    Query(q): Query<UserListQuery>,
) -> Result<Json<UserListResponse>, ApiError> {
    let status = q.status.as_deref().filter(|s| *s != "all");
    let users = repo::list_users(&state.db, status).await?;
    Ok(Json(UserListResponse {
        users: users.into_iter().map(PublicUser::from).collect(),
        success: true,
    }))
}

async fn change_status(
    state: &AppState,
    user_id: Uuid,
    status: &str,
    done: &str,
) -> Result<Json<MessageResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    if user.is_super_admin() {
        return Err(ApiError::bad_request("Cannot modify SuperAdmin user"));
    }
    User::set_status(&state.db, user.id, status).await?;
    info!(user_id = %user.id, status, "user status changed");
    Ok(Json(MessageResponse {
        message: done.into(),
        success: true,
    }))
}

#[instrument(skip_all, fields(target = %id))]
pub async fn approve_user(
    State(state): State<AppState>,
    SuperAdminUser(_): SuperAdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    change_status(&state, id, STATUS_APPROVED, "User approved successfully").await
}

#[instrument(skip_all, fields(target = %id))]
pub async fn reject_user(
    State(state): State<AppState>,
    SuperAdminUser(_): SuperAdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    change_status(&state, id, STATUS_REJECTED, "User rejected successfully").await
}

#[instrument(skip_all)]
pub async fn user_stats(
    State(state): State<AppState>,
    SuperAdminUser(_): SuperAdminUser,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = repo::user_stats(&state.db).await?;
    Ok(Json(StatsResponse {
        stats,
        success: true,
    }))
}
