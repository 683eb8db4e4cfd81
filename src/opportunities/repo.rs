use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Opportunity, OpportunityListRow, OPPORTUNITY_COLUMNS};

const LIST_SELECT: &str = "SELECT o.id, o.title, o.tuition_type, o.salary, o.location, \
            o.days_available, o.requirements, o.experience_level, o.center_id, o.created_by, \
            o.created_at, \
            c.name AS center_name, c.location AS center_location, \
            c.logo_url AS center_logo_url, c.average_rating AS center_average_rating, \
            c.total_ratings AS center_total_ratings, \
            u.fullname AS poster_fullname, u.email AS poster_email \
     FROM opportunities o \
     JOIN centers c ON c.id = o.center_id \
     JOIN users u ON u.id = o.created_by";

/// Sort inputs come from the query string; only whitelisted columns reach
/// the SQL text.
fn sort_clause(sort_by: &str, order: &str) -> (&'static str, &'static str) {
    let column = match sort_by {
        "salary" => "o.salary",
        "rating" => "c.average_rating",
        _ => "o.created_at",
    };
    let direction = if order.eq_ignore_ascii_case("asc") {
        "ASC"
    } else {
        "DESC"
    };
    (column, direction)
}

impl Opportunity {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Opportunity>> {
        let sql = format!("SELECT {OPPORTUNITY_COLUMNS} FROM opportunities WHERE id = $1");
        let opportunity = sqlx::query_as::<_, Opportunity>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(opportunity)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        title: &str,
        tuition_type: &str,
        salary: i64,
        location: &str,
        days_available: &[String],
        requirements: &[String],
        experience_level: i32,
        center_id: Uuid,
        created_by: Uuid,
    ) -> anyhow::Result<Opportunity> {
        let sql = format!(
            "INSERT INTO opportunities (title, tuition_type, salary, location, days_available, \
             requirements, experience_level, center_id, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {OPPORTUNITY_COLUMNS}"
        );
        let opportunity = sqlx::query_as::<_, Opportunity>(&sql)
            .bind(title)
            .bind(tuition_type)
            .bind(salary)
            .bind(location)
            .bind(days_available)
            .bind(requirements)
            .bind(experience_level)
            .bind(center_id)
            .bind(created_by)
            .fetch_one(db)
            .await?;
        Ok(opportunity)
    }

    /// Persist the mutable posting fields.
    pub async fn save(&self, db: &PgPool) -> anyhow::Result<Opportunity> {
        let sql = format!(
            "UPDATE opportunities SET title = $2, tuition_type = $3, salary = $4, location = $5, \
             days_available = $6, requirements = $7, experience_level = $8, center_id = $9 \
             WHERE id = $1 \
             RETURNING {OPPORTUNITY_COLUMNS}"
        );
        let opportunity = sqlx::query_as::<_, Opportunity>(&sql)
            .bind(self.id)
            .bind(&self.title)
            .bind(&self.tuition_type)
            .bind(self.salary)
            .bind(&self.location)
            .bind(&self.days_available)
            .bind(&self.requirements)
            .bind(self.experience_level)
            .bind(self.center_id)
            .fetch_one(db)
            .await?;
        Ok(opportunity)
    }

    /// Deletes the opportunity; its applications cascade via the foreign key.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM opportunities WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

/// Public listing with optional title keyword and whitelisted sorting.
pub async fn list_public(
    db: &PgPool,
    keyword: &str,
    sort_by: &str,
    order: &str,
) -> anyhow::Result<Vec<OpportunityListRow>> {
    let (column, direction) = sort_clause(sort_by, order);
    let sql = format!(
        "{LIST_SELECT} WHERE ($1 = '' OR o.title ILIKE '%' || $1 || '%') \
         ORDER BY {column} {direction}"
    );
    let rows = sqlx::query_as::<_, OpportunityListRow>(&sql)
        .bind(keyword)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn list_by_creator(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<OpportunityListRow>> {
    let sql = format!("{LIST_SELECT} WHERE o.created_by = $1 ORDER BY o.created_at DESC");
    let rows = sqlx::query_as::<_, OpportunityListRow>(&sql)
        .bind(user_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn find_list_row(db: &PgPool, id: Uuid) -> anyhow::Result<Option<OpportunityListRow>> {
    let sql = format!("{LIST_SELECT} WHERE o.id = $1");
    let row = sqlx::query_as::<_, OpportunityListRow>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::sort_clause;

    #[test]
    fn sort_clause_whitelists_columns() {
        assert_eq!(sort_clause("salary", "asc"), ("o.salary", "ASC"));
        assert_eq!(sort_clause("rating", "desc"), ("c.average_rating", "DESC"));
        assert_eq!(sort_clause("createdAt", "desc"), ("o.created_at", "DESC"));
        // injection attempts fall back to the default column
        assert_eq!(
            sort_clause("salary; DROP TABLE users", "desc"),
            ("o.created_at", "DESC")
        );
        assert_eq!(sort_clause("createdAt", "sideways"), ("o.created_at", "DESC"));
    }
}
