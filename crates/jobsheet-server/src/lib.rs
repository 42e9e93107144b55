//! jobsheet-server
//!
//! HTTP surface of the PDF core: legacy-compatible download endpoints,
//! submission intake and the template audit.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod download;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

use state::AppState;

/// Signatures travel as data URLs inside JSON bodies.
const BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/ping", get(routes::health::ping))
        // Submission intake
        .route(
            "/api/form-submissions",
            get(routes::submissions::list_submissions),
        )
        .route(
            "/api/form-submissions",
            post(routes::submissions::create_submission),
        )
        // Submission PDFs
        .route(
            "/api/form-submissions/{submission_id}/pdf",
            get(routes::pdf::submission_pdf),
        )
        .route(
            "/api/forms/{form_id}/submissions/{submission_id}/pdf",
            get(routes::pdf::form_submission_pdf),
        )
        // Specific form downloads
        .route(
            "/api/generate-ABSACertificat-pdf",
            post(routes::pdf::absa_pdf),
        )
        .route("/api/generate-liability-pdf", get(routes::pdf::liability_pdf))
        .route("/api/generate-sahl-pdf", get(routes::pdf::sahl_pdf))
        .route("/api/generate-clearance-pdf", get(routes::pdf::clearance_pdf))
        .route("/api/discovery/{id}", get(routes::pdf::discovery_pdf))
        .route(
            "/api/generate-noncompliance-pdf/{id}",
            get(routes::pdf::noncompliance_pdf),
        )
        .route(
            "/api/fill-material-list-pdf",
            post(routes::pdf::material_list_pdf),
        )
        .route("/api/test-pdf", get(routes::pdf::test_pdf))
        // Admin
        .route("/api/admin/pdf-templates", get(routes::admin::pdf_templates))
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum_mw::from_fn(middleware::request_log::request_log))
                .layer(DefaultBodyLimit::max(BODY_LIMIT)),
        )
        .with_state(state)
}
