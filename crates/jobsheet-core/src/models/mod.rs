pub mod form_data;
pub mod form_kind;
pub mod submission;
