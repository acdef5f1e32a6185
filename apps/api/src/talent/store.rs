//! PostgreSQL access for skills and team members.
//!
//! Single-row operations run on the pool; batch operations (seed, reset, upsert with
//! new skills, normalization, de-duplication) each run in one transaction.

use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use tracing::info;

use crate::models::team::{Skill, SkillRow, TeamMember, TeamMemberRow};
use crate::talent::normalize::NormalizationPlan;
use crate::talent::reconcile::DedupPlan;

const MEMBER_COLUMNS: &str = "id, name, role, location, ldap, domains, skills, languages, \
    certifications, education, experience, outside_interests, linkedin_url, image_url, \
    start_date, created_at, updated_at";

pub async fn list_skills(pool: &PgPool) -> sqlx::Result<Vec<Skill>> {
    let rows = sqlx::query_as::<_, SkillRow>(
        "SELECT id, name, category, icon_name, demand, description FROM skills ORDER BY category, name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Skill::from).collect())
}

pub async fn count_skills(pool: &PgPool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM skills")
        .fetch_one(pool)
        .await
}

/// All members in creation order.
pub async fn list_members(pool: &PgPool) -> sqlx::Result<Vec<TeamMember>> {
    let rows = sqlx::query_as::<_, TeamMemberRow>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM team_members ORDER BY created_at, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(TeamMember::from).collect())
}

pub async fn get_member(pool: &PgPool, id: &str) -> sqlx::Result<Option<TeamMember>> {
    let row = sqlx::query_as::<_, TeamMemberRow>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM team_members WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(TeamMember::from))
}

/// Oldest member whose trimmed name equals `name`.
pub async fn find_member_by_name(pool: &PgPool, name: &str) -> sqlx::Result<Option<TeamMember>> {
    let row = sqlx::query_as::<_, TeamMemberRow>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM team_members WHERE btrim(name) = $1 \
         ORDER BY created_at, id LIMIT 1"
    ))
    .bind(name.trim())
    .fetch_optional(pool)
    .await?;
    Ok(row.map(TeamMember::from))
}

async fn insert_skill(conn: &mut PgConnection, skill: &Skill) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO skills (id, name, category, icon_name, demand, description) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&skill.id)
    .bind(&skill.name)
    .bind(skill.category.as_str())
    .bind(&skill.icon_name)
    .bind(skill.demand)
    .bind(&skill.description)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn update_skill(conn: &mut PgConnection, skill: &Skill) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE skills SET name = $2, category = $3, icon_name = $4, demand = $5, description = $6 \
         WHERE id = $1",
    )
    .bind(&skill.id)
    .bind(&skill.name)
    .bind(skill.category.as_str())
    .bind(&skill.icon_name)
    .bind(skill.demand)
    .bind(&skill.description)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Inserts or fully overwrites a member row.
async fn save_member(conn: &mut PgConnection, member: &TeamMember) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO team_members
            (id, name, role, location, ldap, domains, skills, languages, certifications,
             education, experience, outside_interests, linkedin_url, image_url, start_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            role = EXCLUDED.role,
            location = EXCLUDED.location,
            ldap = EXCLUDED.ldap,
            domains = EXCLUDED.domains,
            skills = EXCLUDED.skills,
            languages = EXCLUDED.languages,
            certifications = EXCLUDED.certifications,
            education = EXCLUDED.education,
            experience = EXCLUDED.experience,
            outside_interests = EXCLUDED.outside_interests,
            linkedin_url = EXCLUDED.linkedin_url,
            image_url = EXCLUDED.image_url,
            start_date = EXCLUDED.start_date,
            updated_at = now()
        "#,
    )
    .bind(&member.id)
    .bind(&member.name)
    .bind(&member.role)
    .bind(&member.location)
    .bind(&member.ldap)
    .bind(&member.domains)
    .bind(Json(&member.skills))
    .bind(&member.languages)
    .bind(&member.certifications)
    .bind(&member.education)
    .bind(&member.experience)
    .bind(&member.outside_interests)
    .bind(&member.linkedin_url)
    .bind(&member.image_url)
    .bind(member.start_date)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Persists a reconciled member together with any skills created for it.
pub async fn save_member_with_skills(
    pool: &PgPool,
    member: &TeamMember,
    new_skills: &[Skill],
) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for skill in new_skills {
        insert_skill(&mut tx, skill).await?;
    }
    save_member(&mut tx, member).await?;
    tx.commit().await?;
    Ok(())
}

pub async fn update_member(pool: &PgPool, member: &TeamMember) -> sqlx::Result<()> {
    let mut conn = pool.acquire().await?;
    save_member(&mut conn, member).await
}

/// Returns false when no member had this ID.
pub async fn delete_member(pool: &PgPool, id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Inserts the seed set. With `wipe`, both tables are cleared first.
pub async fn seed(
    pool: &PgPool,
    skills: &[Skill],
    members: &[TeamMember],
    wipe: bool,
) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    if wipe {
        sqlx::query("DELETE FROM team_members").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM skills").execute(&mut *tx).await?;
    }
    for skill in skills {
        insert_skill(&mut tx, skill).await?;
    }
    for member in members {
        save_member(&mut tx, member).await?;
    }
    tx.commit().await?;
    info!(
        "Seeded {} skills and {} team members (wipe={wipe})",
        skills.len(),
        members.len()
    );
    Ok(())
}

pub async fn apply_normalization(pool: &PgPool, plan: &NormalizationPlan) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for skill in &plan.created_skills {
        insert_skill(&mut tx, skill).await?;
    }
    for skill in &plan.updated_skills {
        update_skill(&mut tx, skill).await?;
    }
    for update in &plan.member_updates {
        sqlx::query("UPDATE team_members SET skills = $2, updated_at = now() WHERE id = $1")
            .bind(&update.member_id)
            .bind(Json(&update.skills))
            .execute(&mut *tx)
            .await?;
    }
    if !plan.deleted_skill_ids.is_empty() {
        sqlx::query("DELETE FROM skills WHERE id = ANY($1)")
            .bind(&plan.deleted_skill_ids)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn apply_dedup(pool: &PgPool, plan: &DedupPlan) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for member in &plan.merged {
        save_member(&mut tx, member).await?;
    }
    if !plan.deleted_ids.is_empty() {
        sqlx::query("DELETE FROM team_members WHERE id = ANY($1)")
            .bind(&plan.deleted_ids)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}
