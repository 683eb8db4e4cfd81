use sqlx::PgPool;

use super::dto::UserStats;
use crate::auth::repo_types::User;

const USER_COLUMNS: &str = "id, fullname, email, phone_number, password_hash, role, status, \
     bio, skills, resume_url, resume_filename, photo_url, created_at, updated_at";

/// All non-SuperAdmin users, optionally filtered by approval status.
pub async fn list_users(db: &PgPool, status: Option<&str>) -> anyhow::Result<Vec<User>> {
    let users = match status {
        Some(status) => {
            let sql = format!(
                "SELECT {USER_COLUMNS} FROM users \
                 WHERE role <> 'SuperAdmin' AND status = $1 \
                 ORDER BY created_at DESC"
            );
            sqlx::query_as::<_, User>(&sql)
                .bind(status)
                .fetch_all(db)
                .await?
        }
        None => {
            let sql = format!(
                "SELECT {USER_COLUMNS} FROM users \
                 WHERE role <> 'SuperAdmin' \
                 ORDER BY created_at DESC"
            );
            sqlx::query_as::<_, User>(&sql).fetch_all(db).await?
        }
    };
    Ok(users)
}

pub async fn user_stats(db: &PgPool) -> anyhow::Result<UserStats> {
    let stats = sqlx::query_as::<_, UserStats>(
        "SELECT count(*) AS total, \
                count(*) FILTER (WHERE status = 'pending') AS pending, \
                count(*) FILTER (WHERE status = 'approved') AS approved, \
                count(*) FILTER (WHERE status = 'rejected') AS rejected, \
                count(*) FILTER (WHERE role = 'Tutor') AS tutors, \
                count(*) FILTER (WHERE role = 'Recruiter') AS recruiters \
         FROM users WHERE role <> 'SuperAdmin'",
    )
    .fetch_one(db)
    .await?;
    Ok(stats)
}
