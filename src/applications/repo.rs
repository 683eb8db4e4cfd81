use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Application, ApplicationWithApplicant, ApplicationWithOwner, AppliedRow};

/// Inserts a pending application for the (opportunity, applicant) pair.
/// Returns `None` when the pair already exists; the unique constraint is
/// the source of truth, so concurrent submissions cannot both win.
pub async fn insert(
    db: &PgPool,
    opportunity_id: Uuid,
    applicant_id: Uuid,
) -> anyhow::Result<Option<Application>> {
    let application = sqlx::query_as::<_, Application>(
        "INSERT INTO applications (opportunity_id, applicant_id) \
         VALUES ($1, $2) \
         ON CONFLICT (opportunity_id, applicant_id) DO NOTHING \
         RETURNING id, opportunity_id, applicant_id, status, created_at",
    )
    .bind(opportunity_id)
    .bind(applicant_id)
    .fetch_optional(db)
    .await?;
    Ok(application)
}

/// All of one applicant's applications, newest first, expanded with the
/// opportunity and its center.
pub async fn list_by_applicant(db: &PgPool, applicant_id: Uuid) -> anyhow::Result<Vec<AppliedRow>> {
    let rows = sqlx::query_as::<_, AppliedRow>(
        "SELECT a.id, a.status, a.created_at, \
                o.id AS opportunity_id, o.title, o.tuition_type, o.salary, o.location, \
                o.days_available, o.requirements, o.experience_level, \
                o.created_at AS opportunity_created_at, \
                c.id AS center_id, c.name AS center_name, c.location AS center_location, \
                c.logo_url AS center_logo_url, c.average_rating AS center_average_rating, \
                c.total_ratings AS center_total_ratings \
         FROM applications a \
         JOIN opportunities o ON o.id = a.opportunity_id \
         JOIN centers c ON c.id = o.center_id \
         WHERE a.applicant_id = $1 \
         ORDER BY a.created_at DESC",
    )
    .bind(applicant_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Application with the id of the user owning its opportunity.
pub async fn find_with_owner(
    db: &PgPool,
    application_id: Uuid,
) -> anyhow::Result<Option<ApplicationWithOwner>> {
    let row = sqlx::query_as::<_, ApplicationWithOwner>(
        "SELECT a.id, a.opportunity_id, a.applicant_id, a.status, a.created_at, \
                o.created_by AS owner_id \
         FROM applications a \
         JOIN opportunities o ON o.id = a.opportunity_id \
         WHERE a.id = $1",
    )
    .bind(application_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn set_status(db: &PgPool, application_id: Uuid, status: &str) -> anyhow::Result<()> {
    sqlx::query("UPDATE applications SET status = $2 WHERE id = $1")
        .bind(application_id)
        .bind(status)
        .execute(db)
        .await?;
    Ok(())
}

/// All applications for one opportunity, newest first, expanded with the
/// applicant's identity.
pub async fn list_for_opportunity(
    db: &PgPool,
    opportunity_id: Uuid,
) -> anyhow::Result<Vec<ApplicationWithApplicant>> {
    let rows = sqlx::query_as::<_, ApplicationWithApplicant>(
        "SELECT a.id, a.status, a.created_at, \
                u.id AS applicant_id, u.fullname AS applicant_fullname, \
                u.email AS applicant_email, u.phone_number AS applicant_phone_number, \
                u.photo_url AS applicant_photo_url \
         FROM applications a \
         JOIN users u ON u.id = a.applicant_id \
         WHERE a.opportunity_id = $1 \
         ORDER BY a.created_at DESC",
    )
    .bind(opportunity_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
