use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::form_data::FormData;
use crate::models::form_kind::FormKind;

/// Submissions allowed per `(job_id, form_id, submitted_by)`.
pub const MAX_SUBMISSIONS: usize = 3;

/// A staff member's filled form for a job.
///
/// `form_id` is kept as the raw string the client sent: unknown ids are
/// accepted at intake and only rejected when a PDF is requested.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormSubmission {
    pub id: String,
    pub job_id: String,
    pub form_id: String,
    pub submitted_by: String,
    #[ts(type = "Record<string, unknown>")]
    pub data: FormData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    pub submitted_at: jiff::Timestamp,
    pub submission_number: u8,
}

impl FormSubmission {
    pub fn form_kind(&self) -> Result<FormKind, CoreError> {
        self.form_id.parse()
    }
}

/// Number for the next submission given how many already exist for the
/// same job, form and user.
pub fn next_submission_number(existing: usize) -> Result<u8, CoreError> {
    if existing >= MAX_SUBMISSIONS {
        return Err(CoreError::SubmissionLimitReached {
            count: existing,
            max: MAX_SUBMISSIONS,
        });
    }
    Ok(existing as u8 + 1)
}
