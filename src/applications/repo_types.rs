use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

/// The record of one user applying to one opportunity. The
/// (opportunity, applicant) pair is unique at the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub opportunity_id: Uuid,
    pub applicant_id: Uuid,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Application status state machine. Initial state is `pending`; an
/// authorized owner may move between any two states, and re-applying the
/// current state is a no-op success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = ();

    /// Case-normalizing parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application joined with the owning opportunity's creator, used for the
/// ownership check on status updates.
#[derive(Debug, FromRow)]
pub struct ApplicationWithOwner {
    pub id: Uuid,
    pub opportunity_id: Uuid,
    pub applicant_id: Uuid,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub owner_id: Uuid,
}

/// Application expanded with the applicant's public identity.
#[derive(Debug, FromRow)]
pub struct ApplicationWithApplicant {
    pub id: Uuid,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub applicant_id: Uuid,
    pub applicant_fullname: String,
    pub applicant_email: String,
    pub applicant_phone_number: String,
    pub applicant_photo_url: String,
}

/// Application expanded with its opportunity and that opportunity's center,
/// for the "my applications" listing.
#[derive(Debug, FromRow)]
pub struct AppliedRow {
    pub id: Uuid,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub opportunity_id: Uuid,
    pub title: String,
    pub tuition_type: String,
    pub salary: i64,
    pub location: String,
    pub days_available: Vec<String>,
    pub requirements: Vec<String>,
    pub experience_level: i32,
    pub opportunity_created_at: OffsetDateTime,
    pub center_id: Uuid,
    pub center_name: String,
    pub center_location: Option<String>,
    pub center_logo_url: Option<String>,
    pub center_average_rating: f64,
    pub center_total_ratings: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            "ACCEPTED".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::Accepted)
        );
        assert_eq!(
            "Pending".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::Pending)
        );
        assert_eq!(
            "rejected".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::Rejected)
        );
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!("withdrawn".parse::<ApplicationStatus>().is_err());
        assert!("".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn status_round_trips_as_str() {
        for s in ["pending", "accepted", "rejected"] {
            assert_eq!(s.parse::<ApplicationStatus>().unwrap().as_str(), s);
        }
    }
}
