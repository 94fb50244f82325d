//! `wicket serve` - the HTTP JSON API.
//!
//! Endpoints:
//! - GET  /                     - Service and database status
//! - POST /analyze              - One question, one query
//! - POST /analyze-deep         - Multi-step analysis with article and charts
//! - POST /finalize             - Conversation to publishable project
//! - POST /validate             - Fact-check an article
//! - POST /publish              - Write a validated project to disk
//! - GET  /rate-limit           - Today's model quota
//! - GET  /{stage}/status       - Readiness of the deep, finalize, validate and publish stages
//!
//! Errors are `{"detail": "..."}`. CORS is permissive.

mod error;
mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use wicket_analyst::Analyst;
use wicket_llm::ModelClient;

/// Build the application router around a shared analyst.
pub fn router<C: ModelClient + 'static>(analyst: Arc<Analyst<C>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health::<C>))
        .route("/analyze", post(handlers::analyze::<C>))
        .route("/analyze-deep", post(handlers::analyze_deep::<C>))
        .route("/analyze-deep/status", get(handlers::analyze_deep_status::<C>))
        .route("/finalize", post(handlers::finalize::<C>))
        .route("/finalize/status", get(handlers::finalize_status::<C>))
        .route("/validate", post(handlers::validate::<C>))
        .route("/validate/status", get(handlers::validate_status::<C>))
        .route("/publish", post(handlers::publish::<C>))
        .route("/publish/status", get(handlers::publish_status))
        .route("/rate-limit", get(handlers::rate_limit::<C>))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(analyst)
}

/// Serve until Ctrl+C.
pub async fn serve<C: ModelClient + 'static>(
    listener: TcpListener,
    analyst: Arc<Analyst<C>>,
) -> anyhow::Result<()> {
    axum::serve(listener, router(analyst))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received shutdown signal"),
        Err(error) => {
            tracing::error!(%error, "failed to listen for Ctrl+C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
