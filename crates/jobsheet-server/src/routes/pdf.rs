//! PDF endpoints.
//!
//! Submission PDFs and the material list are answered straight from memory.
//! The named-template endpoints keep their legacy download behavior: write
//! to the temp directory, stream the file back, delete it afterwards.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use jiff::{Timestamp, Zoned};
use jobsheet_core::filenames;
use jobsheet_core::models::form_data::FormData;
use jobsheet_core::models::form_kind::FormKind;
use jobsheet_pdf::minimal;
use tracing::info;

use crate::download::{attachment, unique_millis};
use crate::error::ApiError;
use crate::state::AppState;

type QueryData = Query<HashMap<String, String>>;

/// Render on the blocking pool. Rendering reads files, walks the PDF and
/// may fetch a signature over blocking HTTP.
async fn render(state: &AppState, form_id: &str, data: FormData) -> Result<Vec<u8>, ApiError> {
    let renderer = state.renderer.clone();
    let form_id = form_id.to_string();
    let today = Zoned::now().date();
    let bytes =
        tokio::task::spawn_blocking(move || renderer.render(&form_id, &data, today)).await??;
    Ok(bytes)
}

/// Render, park the bytes under `temp_name` and stream them as `download`.
async fn temp_download(
    state: &AppState,
    kind: FormKind,
    data: FormData,
    temp_name: String,
    download: &str,
) -> Result<Response, ApiError> {
    let bytes = render(state, kind.id(), data).await?;
    let file = state.downloads.write(&temp_name, &bytes).await?;
    info!(form_id = kind.id(), temp = %file.path().display(), size = bytes.len(), "serving download");
    let body = file.into_body().await?;
    Ok(attachment(body, download))
}

async fn submission_response(state: &AppState, submission_id: &str) -> Result<Response, ApiError> {
    let submission = state
        .store
        .lock()
        .await
        .get(submission_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound("Form submission not found".to_string()))?;

    let bytes = render(state, &submission.form_id, submission.data).await?;
    info!(
        submission_id,
        form_id = %submission.form_id,
        size = bytes.len(),
        "generated submission PDF"
    );
    let download =
        filenames::submission_download(&submission.form_id, submission.submission_number);
    Ok(attachment(bytes, &download))
}

pub async fn form_submission_pdf(
    State(state): State<AppState>,
    Path((_form_id, submission_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    submission_response(&state, &submission_id).await
}

pub async fn submission_pdf(
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> Result<Response, ApiError> {
    submission_response(&state, &submission_id).await
}

pub async fn absa_pdf(
    State(state): State<AppState>,
    Json(data): Json<FormData>,
) -> Result<Response, ApiError> {
    let temp_name = filenames::filled_temp("ABSACertificate", unique_millis());
    temp_download(&state, FormKind::Absa, data, temp_name, filenames::ABSA_DOWNLOAD).await
}

pub async fn liability_pdf(
    State(state): State<AppState>,
    Query(query): QueryData,
) -> Result<Response, ApiError> {
    let temp_name = filenames::filled_temp("LiabilityReport", unique_millis());
    temp_download(
        &state,
        FormKind::Liability,
        query.into(),
        temp_name,
        filenames::LIABILITY_DOWNLOAD,
    )
    .await
}

pub async fn sahl_pdf(
    State(state): State<AppState>,
    Query(query): QueryData,
) -> Result<Response, ApiError> {
    let temp_name = filenames::filled_temp("SAHLReport", unique_millis());
    temp_download(&state, FormKind::Sahl, query.into(), temp_name, filenames::SAHL_DOWNLOAD).await
}

pub async fn clearance_pdf(
    State(state): State<AppState>,
    Query(query): QueryData,
) -> Result<Response, ApiError> {
    let temp_name = filenames::filled_temp("BBPClearanceCertificate", unique_millis());
    temp_download(
        &state,
        FormKind::Clearance,
        query.into(),
        temp_name,
        filenames::CLEARANCE_DOWNLOAD,
    )
    .await
}

pub async fn discovery_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): QueryData,
) -> Result<Response, ApiError> {
    let temp_name = filenames::scoped_temp("discovery", &id, unique_millis());
    let download = filenames::scoped_download("discovery", &id);
    temp_download(&state, FormKind::Discovery, query.into(), temp_name, &download).await
}

/// `selectedIssues` arrives as a JSON-encoded array inside the query string.
pub async fn noncompliance_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): QueryData,
) -> Result<Response, ApiError> {
    let temp_name = filenames::scoped_temp("noncompliance", &id, unique_millis());
    let download = filenames::scoped_download("noncompliance", &id);
    temp_download(
        &state,
        FormKind::NonCompliance,
        query.into(),
        temp_name,
        &download,
    )
    .await
}

pub async fn material_list_pdf(
    State(state): State<AppState>,
    Json(data): Json<FormData>,
) -> Result<Response, ApiError> {
    let bytes = render(&state, FormKind::MaterialList.id(), data).await?;
    Ok(attachment(bytes, filenames::MATERIAL_LIST_DOWNLOAD))
}

/// Template-free page for checking the PDF pipeline.
pub async fn test_pdf() -> Result<Response, ApiError> {
    let bytes = minimal::test_document(&Timestamp::now().to_string())?.to_bytes()?;
    Ok(attachment(bytes, filenames::TEST_DOWNLOAD))
}
