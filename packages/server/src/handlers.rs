//! HTTP handler functions for the loader trigger.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Always `true` while the process is serving requests.
    pub healthy: bool,
    /// Crate version.
    pub version: String,
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /` and `POST /`
///
/// Runs one batch over the configured URL list and answers with the
/// plain-text summary: 200 when the run completed (even if some items
/// failed), 500 when the URL list could not be loaded. Any request body
/// or query string is ignored.
pub async fn trigger(state: web::Data<AppState>) -> HttpResponse {
    let response = state.runner.run().await;

    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    HttpResponse::build(status)
        .content_type("text/plain; charset=utf-8")
        .body(response.message)
}
