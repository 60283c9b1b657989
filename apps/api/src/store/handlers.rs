use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::routes::upload::read_upload;
use crate::state::AppState;
use crate::store::transfer::decode_document;

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeDocument> {
    Json(state.store.snapshot().await)
}

/// PUT /api/v1/resume
pub async fn handle_put_resume(
    State(state): State<AppState>,
    Json(value): Json<Value>,
) -> Result<Json<ResumeDocument>, AppError> {
    let doc = decode_document(value)?;
    state.store.replace(doc.clone()).await?;
    Ok(Json(doc))
}

/// POST /api/v1/resume/reset
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<ResumeDocument>, AppError> {
    state.store.reset().await?;
    Ok(Json(ResumeDocument::template()))
}

/// GET /api/v1/resume/export
/// Downloads the document as `resume_backup_<date>.json`.
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let artifact = state.store.export_document().await?;
    let disposition = format!("attachment; filename=\"{}\"", artifact.filename);
    Ok((
        [
            (header::CONTENT_TYPE, artifact.mime_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.body,
    ))
}

/// POST /api/v1/resume/import
/// Multipart field `file`: a backup previously produced by export.
pub async fn handle_import(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeDocument>, AppError> {
    let upload = read_upload(multipart, "file").await?;
    let text = std::str::from_utf8(&upload.bytes)
        .map_err(|_| AppError::Import("Backup file is not UTF-8 text".to_string()))?;
    let doc = state.store.import_document(text).await?;
    Ok(Json(doc))
}
