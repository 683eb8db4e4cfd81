use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Center, CENTER_COLUMNS};

impl Center {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Center>> {
        let sql = format!("SELECT {CENTER_COLUMNS} FROM centers WHERE id = $1");
        let center = sqlx::query_as::<_, Center>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(center)
    }

    pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<Center>> {
        let sql = format!("SELECT {CENTER_COLUMNS} FROM centers WHERE name = $1");
        let center = sqlx::query_as::<_, Center>(&sql)
            .bind(name)
            .fetch_optional(db)
            .await?;
        Ok(center)
    }

    pub async fn create(db: &PgPool, name: &str, user_id: Uuid) -> sqlx::Result<Center> {
        let sql = format!(
            "INSERT INTO centers (name, user_id) VALUES ($1, $2) RETURNING {CENTER_COLUMNS}"
        );
        sqlx::query_as::<_, Center>(&sql)
            .bind(name)
            .bind(user_id)
            .fetch_one(db)
            .await
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Center>> {
        let sql = format!(
            "SELECT {CENTER_COLUMNS} FROM centers WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let centers = sqlx::query_as::<_, Center>(&sql)
            .bind(user_id)
            .fetch_all(db)
            .await?;
        Ok(centers)
    }

    /// Persist the descriptive fields of this center.
    pub async fn save_details(&self, db: &PgPool) -> sqlx::Result<Center> {
        let sql = format!(
            "UPDATE centers SET name = $2, description = $3, website = $4, location = $5, \
             logo_url = $6 WHERE id = $1 RETURNING {CENTER_COLUMNS}"
        );
        sqlx::query_as::<_, Center>(&sql)
            .bind(self.id)
            .bind(&self.name)
            .bind(&self.description)
            .bind(&self.website)
            .bind(&self.location)
            .bind(&self.logo_url)
            .fetch_one(db)
            .await
    }

    /// Deletes the center; opportunities and their applications cascade via
    /// the foreign keys, keyed strictly on ids.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM centers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
