use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::team::{Skill, TeamMember, TeamMemberPatch};
use crate::state::AppState;
use crate::talent::normalize::{plan_normalization, NormalizationReport};
use crate::talent::profile::{analyze_profile, ProfileAnalysis};
use crate::talent::reconcile::{
    draft_to_member, plan_dedup, resolve_skill_levels, upsert_member, MemberDraft, UNKNOWN_NAME,
};
use crate::talent::seed::build_seed;
use crate::talent::store;
use crate::talent::taxonomy::Taxonomy;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Serialize)]
pub struct UpsertResponse {
    pub member: TeamMember,
    /// True when the draft was merged into an existing member.
    pub merged: bool,
    pub created_skills: Vec<Skill>,
}

#[derive(Serialize)]
pub struct SeedResponse {
    pub skills: usize,
    pub members: usize,
}

#[derive(Serialize)]
pub struct DedupResponse {
    pub merged: usize,
    pub removed: usize,
}

/// GET /api/v1/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
) -> Result<Json<Vec<Skill>>, AppError> {
    Ok(Json(store::list_skills(&state.db).await?))
}

/// GET /api/v1/team
pub async fn handle_list_team(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    Ok(Json(store::list_members(&state.db).await?))
}

/// POST /api/v1/team
/// Adds a member, or merges the draft into the member with the same ID or name.
pub async fn handle_upsert_member(
    State(state): State<AppState>,
    Json(draft): Json<MemberDraft>,
) -> Result<(StatusCode, Json<UpsertResponse>), AppError> {
    let known = store::list_skills(&state.db).await?;
    let (levels, created_skills) = resolve_skill_levels(&draft.skills, &known, new_id);

    let mut existing = match draft.id.as_deref() {
        Some(id) => store::get_member(&state.db, id).await?,
        None => None,
    };
    if existing.is_none() {
        let name = draft.trimmed_name().unwrap_or(UNKNOWN_NAME);
        existing = store::find_member_by_name(&state.db, name).await?;
    }

    let merged = existing.is_some();
    let incoming = draft_to_member(&draft, new_id(), levels);
    let member = upsert_member(existing.as_ref(), incoming);
    store::save_member_with_skills(&state.db, &member, &created_skills).await?;

    info!(
        "{} team member {} ({} new skills)",
        if merged { "Merged" } else { "Created" },
        member.id,
        created_skills.len()
    );

    let status = if merged {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((
        status,
        Json(UpsertResponse {
            member,
            merged,
            created_skills,
        }),
    ))
}

/// PATCH /api/v1/team/:id
pub async fn handle_update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TeamMemberPatch>,
) -> Result<Json<TeamMember>, AppError> {
    let current = store::get_member(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("team member {id}")))?;
    let next = patch.apply_to(&current);
    store::update_member(&state.db, &next).await?;
    Ok(Json(next))
}

/// DELETE /api/v1/team/:id
pub async fn handle_delete_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if store::delete_member(&state.db, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("team member {id}")))
    }
}

/// POST /api/v1/team/dedupe
pub async fn handle_dedupe_team(
    State(state): State<AppState>,
) -> Result<Json<DedupResponse>, AppError> {
    let members = store::list_members(&state.db).await?;
    let plan = plan_dedup(&members);
    if !plan.deleted_ids.is_empty() {
        store::apply_dedup(&state.db, &plan).await?;
    }
    info!(
        "De-duplicated team: {} merged, {} removed",
        plan.merged.len(),
        plan.deleted_ids.len()
    );
    Ok(Json(DedupResponse {
        merged: plan.merged.len(),
        removed: plan.deleted_ids.len(),
    }))
}

/// POST /api/v1/talent/seed
/// Only seeds an empty taxonomy; use reset to start over.
pub async fn handle_seed_talent(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SeedResponse>), AppError> {
    if store::count_skills(&state.db).await? > 0 {
        return Err(AppError::UnprocessableEntity(
            "Talent data is already seeded; use /api/v1/talent/reset".to_string(),
        ));
    }
    let (skills, members) = build_seed(new_id);
    store::seed(&state.db, &skills, &members, false).await?;
    Ok((
        StatusCode::CREATED,
        Json(SeedResponse {
            skills: skills.len(),
            members: members.len(),
        }),
    ))
}

/// POST /api/v1/talent/reset
pub async fn handle_reset_talent(
    State(state): State<AppState>,
) -> Result<Json<SeedResponse>, AppError> {
    let (skills, members) = build_seed(new_id);
    store::seed(&state.db, &skills, &members, true).await?;
    Ok(Json(SeedResponse {
        skills: skills.len(),
        members: members.len(),
    }))
}

/// POST /api/v1/talent/normalize
pub async fn handle_normalize_skills(
    State(state): State<AppState>,
) -> Result<Json<NormalizationReport>, AppError> {
    let skills = store::list_skills(&state.db).await?;
    let members = store::list_members(&state.db).await?;

    let plan = plan_normalization(&Taxonomy::builtin(), &skills, &members, new_id);
    if !plan.is_empty() {
        store::apply_normalization(&state.db, &plan).await?;
    }

    let report = plan.report();
    info!(
        "Skill normalization: {} created, {} refreshed, {} members updated, {} deleted",
        report.created_skills, report.updated_skills, report.updated_members, report.deleted_skills
    );
    Ok(Json(report))
}

/// POST /api/v1/talent/analyze-profile
/// Multipart upload with a `file` field holding a PDF.
pub async fn handle_analyze_profile(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProfileAnalysis>, AppError> {
    let mut pdf = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            pdf = Some(bytes);
            break;
        }
    }

    let pdf = pdf
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let analysis = analyze_profile(&state.llm, &state.s3, &state.config.s3_bucket, pdf).await?;
    Ok(Json(analysis))
}
