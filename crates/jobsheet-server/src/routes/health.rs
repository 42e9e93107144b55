use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Ping {
    message: &'static str,
}

pub async fn ping() -> Json<Ping> {
    Json(Ping {
        message: "Job Management System API v1.0",
    })
}
