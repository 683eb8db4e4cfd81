use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::User;

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

/// Profile sub-record exposed to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub resume: Option<String>,
    pub resume_originalname: Option<String>,
    pub profile_photo: String,
}

/// Public part of the user returned to the client. Never carries the
/// password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub status: String,
    pub profile: Profile,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            fullname: u.fullname,
            email: u.email,
            phone_number: u.phone_number,
            role: u.role,
            status: u.status,
            profile: Profile {
                bio: u.bio,
                skills: u.skills,
                resume: u.resume_url,
                resume_originalname: u.resume_filename,
                profile_photo: u.photo_url,
            },
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
    pub token: String,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: PublicUser,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdateResponse {
    pub message: String,
    pub user: PublicUser,
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            fullname: "A Tutor".into(),
            email: "tutor@example.com".into(),
            phone_number: "01700000000".into(),
            password_hash: "secret-hash".into(),
            role: "Tutor".into(),
            status: "pending".into(),
            bio: Some("I teach".into()),
            skills: vec!["Math".into()],
            resume_url: None,
            resume_filename: None,
            photo_url: "https://fake.local/p.jpg".into(),
            created_at: datetime!(2024-01-01 00:00 UTC),
            updated_at: datetime!(2024-01-01 00:00 UTC),
        }
    }

    #[test]
    fn public_user_hides_password_hash() {
        let json = serde_json::to_string(&PublicUser::from(sample_user())).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("phoneNumber"));
        assert!(json.contains("profilePhoto"));
    }
}
