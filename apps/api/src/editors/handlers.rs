use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::editors::courses::CourseField;
use crate::editors::education::EducationField;
use crate::editors::experience::ExperienceField;
use crate::editors::photo::{clear_photo, set_photo, validated_data_uri};
use crate::editors::profile::{set_profile_field, ProfileField};
use crate::editors::skills::{set_skills, skill_tokens};
use crate::editors::{patch_entry, prepend_entry, remove_entry, SectionEntry};
use crate::errors::AppError;
use crate::models::resume::{CourseEntry, EducationEntry, ExperienceEntry, ResumeDocument};
use crate::routes::upload::read_upload;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ProfilePatch {
    pub field: ProfileField,
    pub value: String,
}

#[derive(Deserialize)]
pub struct SkillsUpdate {
    pub skills: String,
}

#[derive(Serialize)]
pub struct SkillsResponse {
    pub skills: String,
    pub tokens: Vec<String>,
}

#[derive(Deserialize)]
pub struct EntryPatch<F> {
    pub field: F,
    pub value: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Scalar sections
// ────────────────────────────────────────────────────────────────────────────

/// PATCH /api/v1/resume/profile
pub async fn handle_patch_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfilePatch>,
) -> Result<Json<ResumeDocument>, AppError> {
    let doc = state
        .store
        .update(move |doc| {
            set_profile_field(doc, req.field, req.value);
            doc.clone()
        })
        .await?;
    Ok(Json(doc))
}

/// PUT /api/v1/resume/skills
pub async fn handle_put_skills(
    State(state): State<AppState>,
    Json(req): Json<SkillsUpdate>,
) -> Result<Json<SkillsResponse>, AppError> {
    let tokens = skill_tokens(&req.skills)
        .into_iter()
        .map(str::to_string)
        .collect();
    let skills = req.skills.clone();
    state
        .store
        .update(move |doc| set_skills(doc, req.skills))
        .await?;
    Ok(Json(SkillsResponse { skills, tokens }))
}

/// POST /api/v1/resume/photo
/// Multipart field `photo`; only `image/*` uploads are accepted.
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<StatusCode, AppError> {
    let upload = read_upload(multipart, "photo").await?;
    let mime_type = upload.content_type.as_deref().unwrap_or_default();
    let data_uri = validated_data_uri(mime_type, &upload.bytes)?;
    state
        .store
        .update(move |doc| set_photo(doc, data_uri))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/resume/photo
pub async fn handle_delete_photo(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.update(clear_photo).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// List sections
// ────────────────────────────────────────────────────────────────────────────

async fn create_entry<E>(state: &AppState) -> Result<(StatusCode, Json<E>), AppError>
where
    E: SectionEntry + Serialize + Send + 'static,
{
    let entry = state
        .store
        .update(|doc| prepend_entry(E::list_mut(doc)))
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_entry<E>(
    state: &AppState,
    id: String,
    req: EntryPatch<E::Field>,
) -> Result<Json<E>, AppError>
where
    E: SectionEntry + Serialize + Send + 'static,
    E::Field: Send,
{
    let target = id.clone();
    let updated = state
        .store
        .update(move |doc| patch_entry(E::list_mut(doc), &target, req.field, req.value))
        .await?;
    updated
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("{} {id} not found", E::LABEL)))
}

async fn delete_entry<E>(state: &AppState, id: String) -> Result<StatusCode, AppError>
where
    E: SectionEntry + Send + 'static,
{
    let target = id.clone();
    let removed = state
        .store
        .update(move |doc| remove_entry(E::list_mut(doc), &target))
        .await?;
    if !removed {
        return Err(AppError::NotFound(format!("{} {id} not found", E::LABEL)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resume/experience
pub async fn handle_create_experience(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ExperienceEntry>), AppError> {
    create_entry(&state).await
}

/// PATCH /api/v1/resume/experience/:id
pub async fn handle_patch_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EntryPatch<ExperienceField>>,
) -> Result<Json<ExperienceEntry>, AppError> {
    update_entry(&state, id, req).await
}

/// DELETE /api/v1/resume/experience/:id
pub async fn handle_delete_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    delete_entry::<ExperienceEntry>(&state, id).await
}

/// POST /api/v1/resume/education
pub async fn handle_create_education(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<EducationEntry>), AppError> {
    create_entry(&state).await
}

/// PATCH /api/v1/resume/education/:id
pub async fn handle_patch_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EntryPatch<EducationField>>,
) -> Result<Json<EducationEntry>, AppError> {
    update_entry(&state, id, req).await
}

/// DELETE /api/v1/resume/education/:id
pub async fn handle_delete_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    delete_entry::<EducationEntry>(&state, id).await
}

/// POST /api/v1/resume/courses
pub async fn handle_create_course(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CourseEntry>), AppError> {
    create_entry(&state).await
}

/// PATCH /api/v1/resume/courses/:id
pub async fn handle_patch_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EntryPatch<CourseField>>,
) -> Result<Json<CourseEntry>, AppError> {
    update_entry(&state, id, req).await
}

/// DELETE /api/v1/resume/courses/:id
pub async fn handle_delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    delete_entry::<CourseEntry>(&state, id).await
}
