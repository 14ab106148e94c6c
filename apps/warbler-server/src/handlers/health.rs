//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    /// `up` or `down`; absent when running without a database.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

/// Health check endpoint - returns server status.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = database_status(&state).await;
    let healthy = database != Some("down");

    let response = HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        database,
    };

    if healthy {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[cfg(feature = "postgres")]
async fn database_status(state: &AppState) -> Option<&'static str> {
    let db = state.db.as_ref()?;
    match db.ping().await {
        Ok(()) => Some("up"),
        Err(e) => {
            tracing::error!(error = %e, "Database ping failed");
            Some("down")
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn database_status(_state: &AppState) -> Option<&'static str> {
    None
}
