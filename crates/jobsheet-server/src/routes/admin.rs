use axum::Json;
use axum::extract::State;
use jobsheet_pdf::audit::TemplateAudit;

use crate::error::ApiError;
use crate::state::AppState;

/// Per template: whether its file is present and which expected fields it
/// lacks.
pub async fn pdf_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemplateAudit>>, ApiError> {
    let renderer = state.renderer.clone();
    let audits = tokio::task::spawn_blocking(move || renderer.audit()).await?;
    Ok(Json(audits))
}
