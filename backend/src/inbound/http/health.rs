//! Health endpoint for orchestration and uptime monitors.

use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::state::HttpState;

/// Health report returned by `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheck {
    /// Fixed `"healthy"` while the process serves traffic.
    pub status: String,
    /// Server time at which the probe ran.
    pub timestamp: DateTime<Utc>,
    /// Crate version of the running binary.
    pub version: String,
}

/// Server health probe. The only endpoint that requires no API key.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["system"],
    security([]),
    responses(
        (status = 200, description = "Server is running", body = HealthCheck)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthCheck {
        status: "healthy".to_owned(),
        timestamp: Utc::now(),
        version: state.version.to_owned(),
    })
}
