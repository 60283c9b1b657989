use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::editors::experience::ExperienceField;
use crate::editors::patch_entry;
use crate::errors::AppError;
use crate::preview::build_preview;
use crate::preview::text::render_text;
use crate::state::AppState;

#[derive(Serialize)]
pub struct RewriteResponse {
    pub id: String,
    pub description: String,
    /// False when the entry was removed while the rewrite ran.
    pub applied: bool,
}

#[derive(Serialize)]
pub struct AtsScanResponse {
    pub suggestions: Vec<String>,
    /// False when the ATS modal was closed before the scan finished.
    pub stored: bool,
}

/// POST /api/v1/resume/experience/:id/rewrite
///
/// Rewrites the entry's description and writes the result back by id.
pub async fn handle_rewrite_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RewriteResponse>, AppError> {
    let description = state
        .store
        .snapshot()
        .await
        .experience
        .into_iter()
        .find(|e| e.id == id)
        .map(|e| e.description)
        .ok_or_else(|| AppError::NotFound(format!("Experience entry {id} not found")))?;
    if description.trim().is_empty() {
        return Err(AppError::Validation(
            "Description is empty, nothing to rewrite".to_string(),
        ));
    }

    let _guard = state
        .rewrite_flag
        .try_begin()
        .ok_or_else(|| AppError::Conflict("A rewrite is already in progress".to_string()))?;

    let api_key = state.credentials.effective();
    let rewritten = state
        .ai
        .rewrite_experience(api_key.as_deref(), &description)
        .await?;

    let target = id.clone();
    let text = rewritten.clone();
    let applied = state
        .store
        .update(move |doc| {
            patch_entry(
                &mut doc.experience,
                &target,
                ExperienceField::Description,
                text,
            )
            .is_some()
        })
        .await?;

    if applied {
        info!("Rewrote description of experience entry {id}");
    } else {
        warn!("Experience entry {id} was removed during rewrite; result discarded");
    }

    Ok(Json(RewriteResponse {
        id,
        description: rewritten,
        applied,
    }))
}

/// POST /api/v1/ats/scan
///
/// Requires the ATS modal to be open. The result is kept only if it still is when the
/// analysis returns.
pub async fn handle_ats_scan(
    State(state): State<AppState>,
) -> Result<Json<AtsScanResponse>, AppError> {
    let _guard = state
        .ats_flag
        .try_begin()
        .ok_or_else(|| AppError::Conflict("An ATS scan is already running".to_string()))?;

    let job_description = state.shell().begin_scan()?;
    let resume_text = render_text(&build_preview(&state.store.snapshot().await));
    let api_key = state.credentials.effective();

    let suggestions = state
        .ai
        .analyze_ats(api_key.as_deref(), &resume_text, &job_description)
        .await?;

    let stored = state.shell().finish_scan(suggestions.clone());
    if !stored {
        warn!("ATS modal closed before the scan finished; result discarded");
    }

    Ok(Json(AtsScanResponse {
        suggestions,
        stored,
    }))
}
