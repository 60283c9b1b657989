pub mod health;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::ai::handlers as ai;
use crate::analytics::handlers as analytics;
use crate::editors::handlers as editors;
use crate::editors::photo::MAX_PHOTO_BYTES;
use crate::preview::handlers as preview;
use crate::shell::handlers as shell;
use crate::state::AppState;
use crate::store::handlers as store;

/// Room for a full-size photo plus the multipart framing, so the photo check reports it.
const PHOTO_BODY_LIMIT: usize = MAX_PHOTO_BYTES + 64 * 1024;
/// A whole document may carry a base64 photo, which is 4/3 of the raw image.
const DOCUMENT_BODY_LIMIT: usize = MAX_PHOTO_BYTES * 2;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document
        .route(
            "/api/v1/resume",
            get(store::handle_get_resume)
                .put(store::handle_put_resume)
                .layer(DefaultBodyLimit::max(DOCUMENT_BODY_LIMIT)),
        )
        .route("/api/v1/resume/reset", post(store::handle_reset))
        .route("/api/v1/resume/export", get(store::handle_export))
        .route(
            "/api/v1/resume/import",
            post(store::handle_import).layer(DefaultBodyLimit::max(DOCUMENT_BODY_LIMIT)),
        )
        // Section editors
        .route("/api/v1/resume/profile", patch(editors::handle_patch_profile))
        .route("/api/v1/resume/skills", put(editors::handle_put_skills))
        .route(
            "/api/v1/resume/photo",
            post(editors::handle_upload_photo)
                .delete(editors::handle_delete_photo)
                .layer(DefaultBodyLimit::max(PHOTO_BODY_LIMIT)),
        )
        .route(
            "/api/v1/resume/experience",
            post(editors::handle_create_experience),
        )
        .route(
            "/api/v1/resume/experience/:id",
            patch(editors::handle_patch_experience).delete(editors::handle_delete_experience),
        )
        .route(
            "/api/v1/resume/experience/:id/rewrite",
            post(ai::handle_rewrite_experience),
        )
        .route(
            "/api/v1/resume/education",
            post(editors::handle_create_education),
        )
        .route(
            "/api/v1/resume/education/:id",
            patch(editors::handle_patch_education).delete(editors::handle_delete_education),
        )
        .route("/api/v1/resume/courses", post(editors::handle_create_course))
        .route(
            "/api/v1/resume/courses/:id",
            patch(editors::handle_patch_course).delete(editors::handle_delete_course),
        )
        // Preview
        .route("/api/v1/preview", get(preview::handle_preview))
        .route("/api/v1/preview/print", get(preview::handle_print))
        .route("/api/v1/preview/text", get(preview::handle_text))
        // Analytics
        .route("/api/v1/dashboard", get(analytics::handle_dashboard))
        // Settings
        .route("/api/v1/settings", get(shell::handle_get_settings))
        .route("/api/v1/settings/api-key", put(shell::handle_set_api_key))
        // Shell
        .route("/api/v1/shell", get(shell::handle_get_shell))
        .route("/api/v1/shell/view", put(shell::handle_set_view))
        .route("/api/v1/shell/tab", put(shell::handle_set_tab))
        .route(
            "/api/v1/shell/modal",
            post(shell::handle_open_modal).delete(shell::handle_close_modal),
        )
        // ATS scan
        .route(
            "/api/v1/ats/job-description",
            put(shell::handle_set_job_description),
        )
        .route("/api/v1/ats/scan", post(ai::handle_ats_scan))
        .route("/api/v1/ats/analysis", delete(shell::handle_clear_analysis))
        // Donation
        .route("/api/v1/donation", get(shell::handle_get_donation))
        .route("/api/v1/donation/confirm", post(shell::handle_confirm_donation))
        .with_state(state)
}
