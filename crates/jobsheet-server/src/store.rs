//! In-memory submission intake.

use jiff::Timestamp;
use jobsheet_core::error::CoreError;
use jobsheet_core::filenames;
use jobsheet_core::models::form_data::FormData;
use jobsheet_core::models::submission::{FormSubmission, next_submission_number};
use serde::Deserialize;

/// A submission as the client sends it, before numbering.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub job_id: String,
    pub form_id: String,
    pub submitted_by: String,
    pub data: FormData,
    pub signature: Option<String>,
}

/// Optional equality filters for listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFilter {
    pub job_id: Option<String>,
    pub form_id: Option<String>,
    pub submitted_by: Option<String>,
}

impl SubmissionFilter {
    fn matches(&self, submission: &FormSubmission) -> bool {
        let eq = |want: &Option<String>, have: &str| want.as_deref().is_none_or(|w| w == have);
        eq(&self.job_id, &submission.job_id)
            && eq(&self.form_id, &submission.form_id)
            && eq(&self.submitted_by, &submission.submitted_by)
    }
}

#[derive(Debug)]
pub struct SubmissionStore {
    submissions: Vec<FormSubmission>,
    next_id: u64,
}

impl Default for SubmissionStore {
    fn default() -> Self {
        Self {
            submissions: Vec::new(),
            next_id: 1,
        }
    }
}

impl SubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number and record a submission. Each `(job, form, user)` triple gets
    /// at most three; the fourth is refused and nothing is stored.
    pub fn submit(
        &mut self,
        new: NewSubmission,
        now: Timestamp,
    ) -> Result<FormSubmission, CoreError> {
        let existing = self
            .submissions
            .iter()
            .filter(|s| {
                s.job_id == new.job_id
                    && s.form_id == new.form_id
                    && s.submitted_by == new.submitted_by
            })
            .count();
        let submission_number = next_submission_number(existing)?;

        let submission = FormSubmission {
            id: filenames::submission_id(self.next_id),
            job_id: new.job_id,
            form_id: new.form_id,
            submitted_by: new.submitted_by,
            data: new.data,
            signature: new.signature,
            submitted_at: now,
            submission_number,
        };
        self.next_id += 1;
        self.submissions.push(submission.clone());
        Ok(submission)
    }

    pub fn get(&self, id: &str) -> Option<&FormSubmission> {
        self.submissions.iter().find(|s| s.id == id)
    }

    pub fn list(&self, filter: &SubmissionFilter) -> Vec<FormSubmission> {
        self.submissions
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}
