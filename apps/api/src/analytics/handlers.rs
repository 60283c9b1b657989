use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::analytics::{build_dashboard, DashboardView, SectorFilter};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub sector: Option<String>,
}

/// GET /api/v1/dashboard?sector=
/// Skill relevance is ranked from the current document's skills.
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Json<DashboardView> {
    let skills = state.store.snapshot().await.skills;
    let filter = SectorFilter::from_query(params.sector.as_deref());
    Json(build_dashboard(state.metrics.as_ref(), &filter, &skills))
}
