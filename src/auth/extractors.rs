use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::{jwt::JwtKeys, repo_types::User};
use crate::{error::ApiError, state::AppState};

/// Pulls the session token from the `token` cookie or the
/// `Authorization: Bearer` header, in that order.
fn token_from_parts(parts: &Parts) -> Option<String> {
    for value in parts.headers.get_all(axum::http::header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some(token) = pair.trim().strip_prefix("token=") {
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Extracts and validates the session token, returning the user ID.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts).ok_or_else(|| {
            ApiError::unauthorized(
                "No token provided. Please provide token in cookie or Authorization header",
            )
        })?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(&token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::unauthorized("Invalid token")
        })?;

        Ok(AuthUser(claims.sub))
    }
}

/// Authenticated user whose account has passed admin approval.
/// SuperAdmin bypasses the approval check.
pub struct ApprovedUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for ApprovedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user_id) = AuthUser::from_request_parts(parts, state).await?;
        let user = User::find_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("User not found"))?;

        if user.is_super_admin() || user.is_approved() {
            return Ok(ApprovedUser(user));
        }
        warn!(user_id = %user.id, status = %user.status, "unapproved account");
        Err(ApiError::forbidden(
            "Your account is pending approval. Please wait for admin approval.",
        ))
    }
}

/// Authenticated user holding the SuperAdmin role.
pub struct SuperAdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for SuperAdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user_id) = AuthUser::from_request_parts(parts, state).await?;
        let user = User::find_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("User not found"))?;

        if !user.is_super_admin() {
            return Err(ApiError::forbidden(
                "Access denied. SuperAdmin privileges required.",
            ));
        }
        Ok(SuperAdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: &str, value: &str) -> Parts {
        let req = Request::builder()
            .header(header, value)
            .body(())
            .unwrap();
        req.into_parts().0
    }

    #[test]
    fn token_from_cookie() {
        let parts = parts_with("cookie", "a=1; token=abc.def.ghi; b=2");
        assert_eq!(token_from_parts(&parts), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn token_from_bearer_header() {
        let parts = parts_with("authorization", "Bearer abc.def.ghi");
        assert_eq!(token_from_parts(&parts), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn cookie_wins_over_header() {
        let req = Request::builder()
            .header("cookie", "token=cookie-token")
            .header("authorization", "Bearer header-token")
            .body(())
            .unwrap();
        let (parts, _) = req.into_parts();
        assert_eq!(token_from_parts(&parts), Some("cookie-token".to_string()));
    }

    #[test]
    fn missing_token_is_none() {
        let req = Request::builder().body(()).unwrap();
        let (parts, _) = req.into_parts();
        assert_eq!(token_from_parts(&parts), None);
    }
}
