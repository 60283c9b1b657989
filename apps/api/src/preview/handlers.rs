use axum::{extract::State, response::Html, Json};

use crate::errors::AppError;
use crate::preview::html::render_html;
use crate::preview::text::render_text;
use crate::preview::{build_preview, PreviewLayout};
use crate::state::AppState;

/// GET /api/v1/preview
pub async fn handle_preview(State(state): State<AppState>) -> Json<PreviewLayout> {
    Json(build_preview(&state.store.snapshot().await))
}

/// GET /api/v1/preview/print
/// The A4 print page. Printing it from the browser is the PDF download.
pub async fn handle_print(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = render_html(&build_preview(&state.store.snapshot().await))?;
    Ok(Html(page))
}

/// GET /api/v1/preview/text
pub async fn handle_text(State(state): State<AppState>) -> String {
    render_text(&build_preview(&state.store.snapshot().await))
}
