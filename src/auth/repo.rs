use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::User;

const USER_COLUMNS: &str = "id, fullname, email, phone_number, password_hash, role, status, \
     bio, skills, resume_url, resume_filename, photo_url, created_at, updated_at";

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    /// Create a new user with hashed password, pending approval.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        id: Uuid,
        fullname: &str,
        email: &str,
        phone_number: &str,
        password_hash: &str,
        role: &str,
        photo_url: &str,
    ) -> sqlx::Result<User> {
        let sql = format!(
            "INSERT INTO users (id, fullname, email, phone_number, password_hash, role, photo_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(fullname)
            .bind(email)
            .bind(phone_number)
            .bind(password_hash)
            .bind(role)
            .bind(photo_url)
            .fetch_one(db)
            .await
    }

    /// Persist the mutable profile fields of this user.
    pub async fn save_profile(&self, db: &PgPool) -> sqlx::Result<User> {
        let sql = format!(
            "UPDATE users SET fullname = $2, email = $3, phone_number = $4, bio = $5, \
             skills = $6, resume_url = $7, resume_filename = $8, updated_at = now() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(self.id)
            .bind(&self.fullname)
            .bind(&self.email)
            .bind(&self.phone_number)
            .bind(&self.bio)
            .bind(&self.skills)
            .bind(&self.resume_url)
            .bind(&self.resume_filename)
            .fetch_one(db)
            .await
    }

    pub async fn set_status(db: &PgPool, id: Uuid, status: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET status = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Idempotent singleton bootstrap guarded by the unique email.
    pub async fn ensure_super_admin(
        db: &PgPool,
        fullname: &str,
        email: &str,
        phone_number: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        sqlx::query(
            "INSERT INTO users (fullname, email, phone_number, password_hash, role, status) \
             VALUES ($1, $2, $3, $4, 'SuperAdmin', 'approved') \
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(fullname)
        .bind(email)
        .bind(phone_number)
        .bind(password_hash)
        .execute(db)
        .await?;

        let user = Self::find_by_email(db, email)
            .await?
            .ok_or_else(|| anyhow::anyhow!("superadmin missing after ensure"))?;
        Ok(user)
    }
}
