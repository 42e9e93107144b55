use std::sync::Arc;

use jobsheet_pdf::Renderer;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::download::TempDownloads;
use crate::store::SubmissionStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub renderer: Renderer,
    pub downloads: TempDownloads,
    pub store: Arc<Mutex<SubmissionStore>>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_renderer(Renderer::new(config.forms_dir.clone()), config)
    }

    /// State around a preconfigured renderer (custom signature transport).
    pub fn with_renderer(renderer: Renderer, config: &Config) -> Self {
        Self {
            renderer,
            downloads: TempDownloads::new(config.temp_dir.clone()),
            store: Arc::new(Mutex::new(SubmissionStore::new())),
        }
    }
}
