use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use jiff::Timestamp;
use jobsheet_core::models::form_data::FormData;
use jobsheet_core::models::submission::{FormSubmission, MAX_SUBMISSIONS};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{NewSubmission, SubmissionFilter};

/// Submitter used when the request names nobody.
const DEFAULT_SUBMITTER: &str = "admin-1";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub form_id: String,
    pub data: Option<FormData>,
    pub signature: Option<String>,
    pub submitted_by: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    #[serde(flatten)]
    pub submission: FormSubmission,
    pub message: String,
    pub remaining_submissions: usize,
}

/// Who is submitting: the body's `submittedBy`, else the user named by a
/// `Bearer mock-token-<id>` header, else the default admin.
fn submitter(req: &SubmitRequest, headers: &HeaderMap) -> String {
    if let Some(user) = req.submitted_by.as_deref().filter(|u| !u.is_empty()) {
        return user.to_string();
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| token.trim_start_matches("mock-token-"))
        .filter(|user| !user.is_empty())
        .unwrap_or(DEFAULT_SUBMITTER)
        .to_string()
}

pub async fn create_submission(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let submitted_by = submitter(&req, &headers);
    let data = match req.data {
        Some(data) if !req.job_id.is_empty() && !req.form_id.is_empty() => data,
        _ => {
            return Err(ApiError::BadRequest(
                "jobId, formId, and data are required".to_string(),
            ));
        }
    };

    let submission = state.store.lock().await.submit(
        NewSubmission {
            job_id: req.job_id,
            form_id: req.form_id,
            submitted_by,
            data,
            signature: req.signature,
        },
        Timestamp::now(),
    )?;
    tracing::info!(
        submission_id = %submission.id,
        job_id = %submission.job_id,
        form_id = %submission.form_id,
        submission_number = submission.submission_number,
        "form submitted"
    );

    let number = usize::from(submission.submission_number);
    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: format!("Form submitted successfully (submission {number}/{MAX_SUBMISSIONS})"),
            remaining_submissions: MAX_SUBMISSIONS - number,
            submission,
        }),
    ))
}

pub async fn list_submissions(
    State(state): State<AppState>,
    Query(filter): Query<SubmissionFilter>,
) -> Json<Vec<FormSubmission>> {
    Json(state.store.lock().await.list(&filter))
}
