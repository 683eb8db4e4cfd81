use axum::{
    extract::{FromRef, Multipart, Path, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{
        LoginRequest, LoginResponse, MessageResponse, ProfileUpdateResponse, PublicUser,
        UserResponse,
    },
    extractors::ApprovedUser,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo_types::User,
};
use crate::{
    error::ApiError,
    state::AppState,
    storage::ext_from_mime,
    validation::{validate_user_registration, UserRegistration},
};

fn cookie_headers(token: &str, max_age_secs: u64) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = format!("token={token}; Max-Age={max_age_secs}; Path=/; HttpOnly; SameSite=Lax");
    headers.insert(SET_COOKIE, value.parse()?);
    Ok(headers)
}

struct UploadedFile {
    bytes: Bytes,
    content_type: String,
    filename: Option<String>,
}

/// Collects text fields and the single `file` field of a multipart form.
async fn read_multipart(
    mut mp: Multipart,
) -> Result<(Vec<(String, String)>, Option<UploadedFile>), ApiError> {
    let mut fields = Vec::new();
    let mut file = None;
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Malformed multipart body"))?
    {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };
        if name == "file" {
            let filename = field.file_name().map(|s| s.to_string());
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".into());
            let bytes = field
                .bytes()
                .await
                .map_err(|_| ApiError::bad_request("Malformed multipart body"))?;
            file = Some(UploadedFile {
                bytes,
                content_type,
                filename,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|_| ApiError::bad_request("Malformed multipart body"))?;
            fields.push((name, value));
        }
    }
    Ok((fields, file))
}

fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

#[instrument(skip(state, mp))]
pub async fn register(
    State(state): State<AppState>,
    mp: Multipart,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let (fields, file) = read_multipart(mp).await?;
    let fullname = field(&fields, "fullname").unwrap_or_default().trim();
    let email = field(&fields, "email")
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    let phone_number = field(&fields, "phoneNumber").unwrap_or_default().trim();
    let password = field(&fields, "password").unwrap_or_default();
    let role = field(&fields, "role").unwrap_or_default().trim();

    let errors = validate_user_registration(&UserRegistration {
        fullname,
        email: &email,
        phone_number,
        password,
        role,
    });
    if let Some(first) = errors.into_iter().next() {
        warn!(%email, error = %first, "registration rejected");
        return Err(ApiError::bad_request(first));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        return Err(ApiError::bad_request("Email already exists"));
    }

    let Some(photo) = file else {
        return Err(ApiError::bad_request("Profile image is required"));
    };

    let user_id = Uuid::new_v4();
    let key = format!(
        "profiles/{}/{}.{}",
        user_id,
        Uuid::new_v4(),
        ext_from_mime(&photo.content_type)
    );
    state
        .storage
        .put_object(&key, photo.bytes, &photo.content_type)
        .await?;
    let photo_url = state.storage.public_url(&key);

    let password_hash = hash_password(password)?;
    let user = User::create(
        &state.db,
        user_id,
        fullname,
        &email,
        phone_number,
        &password_hash,
        role,
        &photo_url,
    )
    .await
    .map_err(ApiError::from)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!(
                "Account created successfully for {}. Your account is pending approval. \
                 Please wait for admin approval to access all features.",
                user.fullname
            ),
            success: true,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    if payload.email.is_empty() || payload.password.is_empty() || payload.role.is_empty() {
        return Err(ApiError::bad_request("Missing required fields"));
    }

    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| ApiError::not_found("Incorrect email or password"))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::bad_request("Incorrect email or password"));
    }

    if user.role != payload.role {
        return Err(ApiError::forbidden(
            "You don't have the necessary role to access this resource",
        ));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;
    let headers = cookie_headers(&token, keys.ttl.as_secs())?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    let message = format!("Welcome back {}", user.fullname);
    Ok((
        headers,
        Json(LoginResponse {
            message,
            user: PublicUser::from(user),
            token,
            success: true,
        }),
    ))
}

#[instrument]
pub async fn logout() -> Result<(HeaderMap, Json<MessageResponse>), ApiError> {
    let headers = cookie_headers("", 0)?;
    Ok((
        headers,
        Json(MessageResponse {
            message: "Logged out successfully".into(),
            success: true,
        }),
    ))
}

#[instrument(skip_all)]
pub async fn update_profile(
    State(state): State<AppState>,
    ApprovedUser(mut user): ApprovedUser,
    mp: Multipart,
) -> Result<Json<ProfileUpdateResponse>, ApiError> {
    let (fields, file) = read_multipart(mp).await?;

    if let Some(v) = field(&fields, "fullname").filter(|v| !v.trim().is_empty()) {
        user.fullname = v.trim().to_string();
    }
    if let Some(v) = field(&fields, "email").filter(|v| !v.trim().is_empty()) {
        user.email = v.trim().to_lowercase();
    }
    if let Some(v) = field(&fields, "phoneNumber").filter(|v| !v.trim().is_empty()) {
        user.phone_number = v.trim().to_string();
    }
    if let Some(v) = field(&fields, "bio").filter(|v| !v.trim().is_empty()) {
        user.bio = Some(v.trim().to_string());
    }
    if let Some(v) = field(&fields, "skills").filter(|v| !v.trim().is_empty()) {
        user.skills = v.split(',').map(|s| s.trim().to_string()).collect();
    }

    if let Some(resume) = file {
        let key = format!(
            "resumes/{}/{}.{}",
            user.id,
            Uuid::new_v4(),
            ext_from_mime(&resume.content_type)
        );
        state
            .storage
            .put_object(&key, resume.bytes, &resume.content_type)
            .await?;
        user.resume_url = Some(state.storage.public_url(&key));
        user.resume_filename = resume.filename;
    }

    let updated = user.save_profile(&state.db).await.map_err(ApiError::from)?;
    info!(user_id = %updated.id, "profile updated");
    Ok(Json(ProfileUpdateResponse {
        message: "Profile updated successfully".into(),
        user: PublicUser::from(updated),
        success: true,
    }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(UserResponse {
        user: PublicUser::from(user),
        success: true,
    }))
}
