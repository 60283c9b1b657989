use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::shell::{EditorTab, Modal, ShellStatus, View, PRINT_URL};
use crate::state::AppState;
use crate::store::credentials::CredentialStatus;

#[derive(Deserialize)]
pub struct ViewRequest {
    pub view: View,
}

#[derive(Deserialize)]
pub struct TabRequest {
    pub tab: EditorTab,
}

#[derive(Deserialize)]
pub struct ModalRequest {
    pub modal: Modal,
}

#[derive(Deserialize)]
pub struct JobDescriptionRequest {
    pub job_description: String,
}

#[derive(Deserialize)]
pub struct ApiKeyRequest {
    pub api_key: String,
}

#[derive(Serialize)]
pub struct DonationInfo {
    pub pix_code: String,
    pub print_url: &'static str,
}

#[derive(Serialize)]
pub struct PrintLink {
    pub print_url: &'static str,
}

fn current_status(state: &AppState) -> ShellStatus {
    state
        .shell()
        .status(state.rewrite_flag.is_active(), state.ats_flag.is_active())
}

/// GET /api/v1/shell
pub async fn handle_get_shell(State(state): State<AppState>) -> Json<ShellStatus> {
    Json(current_status(&state))
}

/// PUT /api/v1/shell/view
pub async fn handle_set_view(
    State(state): State<AppState>,
    Json(req): Json<ViewRequest>,
) -> Json<ShellStatus> {
    state.shell().set_view(req.view);
    Json(current_status(&state))
}

/// PUT /api/v1/shell/tab
pub async fn handle_set_tab(
    State(state): State<AppState>,
    Json(req): Json<TabRequest>,
) -> Json<ShellStatus> {
    state.shell().set_tab(req.tab);
    Json(current_status(&state))
}

/// POST /api/v1/shell/modal
pub async fn handle_open_modal(
    State(state): State<AppState>,
    Json(req): Json<ModalRequest>,
) -> Result<Json<ShellStatus>, AppError> {
    state.shell().open_modal(req.modal)?;
    Ok(Json(current_status(&state)))
}

/// DELETE /api/v1/shell/modal
pub async fn handle_close_modal(State(state): State<AppState>) -> Json<ShellStatus> {
    state.shell().close_modal();
    Json(current_status(&state))
}

/// PUT /api/v1/ats/job-description
pub async fn handle_set_job_description(
    State(state): State<AppState>,
    Json(req): Json<JobDescriptionRequest>,
) -> Json<ShellStatus> {
    state.shell().set_job_description(req.job_description);
    Json(current_status(&state))
}

/// DELETE /api/v1/ats/analysis
pub async fn handle_clear_analysis(State(state): State<AppState>) -> Json<ShellStatus> {
    state.shell().clear_analysis();
    Json(current_status(&state))
}

/// GET /api/v1/settings
/// Reports whether a key is configured. The key itself is never returned.
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<CredentialStatus> {
    Json(state.credentials.status())
}

/// PUT /api/v1/settings/api-key
/// Saves the key and closes the settings modal. A blank key clears it.
pub async fn handle_set_api_key(
    State(state): State<AppState>,
    Json(req): Json<ApiKeyRequest>,
) -> Result<Json<CredentialStatus>, AppError> {
    state.credentials.set(&req.api_key).await?;
    state.shell().close_if_open(Modal::Settings);
    let status = state.credentials.status();
    info!("AI credential updated (configured: {})", status.configured);
    Ok(Json(status))
}

/// GET /api/v1/donation
pub async fn handle_get_donation(State(state): State<AppState>) -> Json<DonationInfo> {
    Json(DonationInfo {
        pix_code: state.config.donation_pix_code.clone(),
        print_url: PRINT_URL,
    })
}

/// POST /api/v1/donation/confirm
/// Closes the donation modal and hands back the page to print.
pub async fn handle_confirm_donation(State(state): State<AppState>) -> Json<PrintLink> {
    state.shell().close_if_open(Modal::Donation);
    Json(PrintLink {
        print_url: PRINT_URL,
    })
}
