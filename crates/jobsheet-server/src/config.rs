use std::env;
use std::path::PathBuf;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address, `JOBSHEET_BIND`.
    pub bind: String,
    /// Template directory, `JOBSHEET_FORMS_DIR`.
    pub forms_dir: PathBuf,
    /// Scratch directory for download-style endpoints, `JOBSHEET_TEMP_DIR`.
    pub temp_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind: env::var("JOBSHEET_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            forms_dir: env::var("JOBSHEET_FORMS_DIR")
                .unwrap_or_else(|_| "public/forms".to_string())
                .into(),
            temp_dir: env::var("JOBSHEET_TEMP_DIR")
                .unwrap_or_else(|_| "temp".to_string())
                .into(),
        }
    }
}
