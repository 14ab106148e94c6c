//! # Warbler Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use warbler_core::ports::RateLimiter;
use warbler_infra::InMemoryRateLimiter;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(host = %config.host, port = config.port, "Starting Warbler server");

    let state = AppState::new(&config).await?;

    // One limiter for every worker, so the budget is per process.
    let auth_limiter: Arc<dyn RateLimiter> =
        Arc::new(InMemoryRateLimiter::new(config.auth_rate_limit.clone()));

    HttpServer::new(move || {
        let auth_limiter = auth_limiter.clone();
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(|cfg| handlers::configure_routes(cfg, auth_limiter))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
