use axum::Json;
use chrono::Local;
use serde::Serialize;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
}

impl HealthStatus {
    /// "OK" stamped with the local wall-clock time, ISO-8601 without offset.
    pub fn now() -> Self {
        Self {
            status: "OK",
            timestamp: Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// GET /health
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus::now())
}
