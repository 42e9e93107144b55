//! File naming conventions.
//!
//! Pure string functions. Download names are part of the contract with
//! existing clients and must not change.

/// Temp file for the named-template download endpoints
/// (`ABSACertificate_filled_1718000000000.pdf`).
pub fn filled_temp(stem: &str, millis: i64) -> String {
    format!("{stem}_filled_{millis}.pdf")
}

/// Temp file for the id-scoped download endpoints
/// (`discovery-42-1718000000000.pdf`).
pub fn scoped_temp(prefix: &str, id: &str, millis: i64) -> String {
    format!("{prefix}-{id}-{millis}.pdf")
}

pub fn scoped_download(prefix: &str, id: &str) -> String {
    format!("{prefix}-{id}.pdf")
}

pub fn submission_download(form_id: &str, submission_number: u8) -> String {
    format!("{form_id}-submission-{submission_number}.pdf")
}

pub fn submission_id(counter: u64) -> String {
    format!("submission-{counter}")
}

pub const ABSA_DOWNLOAD: &str = "ABSACertificate_filled.pdf";
pub const LIABILITY_DOWNLOAD: &str = "LiabilityReport.pdf";
pub const SAHL_DOWNLOAD: &str = "SAHLReport.pdf";
pub const CLEARANCE_DOWNLOAD: &str = "BBPClearanceCertificate.pdf";
pub const MATERIAL_LIST_DOWNLOAD: &str = "Material_List_Filled.pdf";
pub const TEST_DOWNLOAD: &str = "test.pdf";
