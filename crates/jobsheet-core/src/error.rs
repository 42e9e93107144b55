use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported form type: {0}")]
    UnsupportedFormType(String),

    #[error("maximum of {max} submissions allowed per form (found {count})")]
    SubmissionLimitReached { count: usize, max: usize },
}
