//! jobsheet-core
//!
//! Pure domain types and file naming conventions shared by the PDF core and
//! the HTTP layer. No PDF or HTTP dependency; this is the shared vocabulary
//! of the jobsheet system.

pub mod error;
pub mod filenames;
pub mod models;
