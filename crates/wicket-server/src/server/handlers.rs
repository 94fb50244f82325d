//! Route handlers. Each one unpacks the body, calls the analyst, and wraps
//! the result in JSON.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use wicket_analyst::Analyst;
use wicket_core::entities::{ProjectOutput, ValidationReport};
use wicket_core::enums::QuotaStatus;
use wicket_core::requests::{
    AnalyzeRequest, DeepAnalysisRequest, FinalizeRequest, PublishRequest, ValidationRequest,
};
use wicket_core::responses::{
    AnalysisResponse, DeepAnalysisResponse, HealthResponse, PublishResponse, RateLimitResponse,
    StageStatusResponse,
};
use wicket_llm::ModelClient;

use super::error::ApiError;

type AppState<C> = State<Arc<Analyst<C>>>;
type Body<T> = Result<Json<T>, JsonRejection>;

/// Fallback handler for unmatched routes.
pub(crate) async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}

/// GET /
pub(crate) async fn health<C: ModelClient + 'static>(
    State(analyst): AppState<C>,
) -> Json<HealthResponse> {
    let database = if analyst.lake().exists() {
        "connected"
    } else {
        "missing"
    };
    Json(HealthResponse {
        status: "online".to_string(),
        database: database.to_string(),
    })
}

/// POST /analyze
pub(crate) async fn analyze<C: ModelClient + 'static>(
    State(analyst): AppState<C>,
    body: Body<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(request) = body?;
    if let Some(project_id) = &request.project_id {
        tracing::debug!(%project_id, "analyze request");
    }
    Ok(Json(analyst.analyze(&request.prompt).await?))
}

/// POST /analyze-deep
pub(crate) async fn analyze_deep<C: ModelClient + 'static>(
    State(analyst): AppState<C>,
    body: Body<DeepAnalysisRequest>,
) -> Result<Json<DeepAnalysisResponse>, ApiError> {
    let Json(request) = body?;
    Ok(Json(
        analyst
            .analyze_deep(&request.prompt, request.max_steps)
            .await?,
    ))
}

/// POST /finalize
pub(crate) async fn finalize<C: ModelClient + 'static>(
    State(analyst): AppState<C>,
    body: Body<FinalizeRequest>,
) -> Result<Json<ProjectOutput>, ApiError> {
    let Json(request) = body?;
    Ok(Json(analyst.finalize(&request).await?))
}

/// POST /validate
pub(crate) async fn validate<C: ModelClient + 'static>(
    State(analyst): AppState<C>,
    body: Body<ValidationRequest>,
) -> Result<Json<ValidationReport>, ApiError> {
    let Json(request) = body?;
    Ok(Json(analyst.validate(&request).await?))
}

/// POST /publish
pub(crate) async fn publish<C: ModelClient + 'static>(
    State(analyst): AppState<C>,
    body: Body<PublishRequest>,
) -> Result<Json<PublishResponse>, ApiError> {
    let Json(request) = body?;
    Ok(Json(analyst.publish(request).await?))
}

/// GET /rate-limit
pub(crate) async fn rate_limit<C: ModelClient + 'static>(
    State(analyst): AppState<C>,
) -> Json<RateLimitResponse> {
    let quota = analyst.gateway().quota();
    let (status, message) = if quota.is_exhausted() {
        (
            QuotaStatus::LimitReached,
            "Daily limit reached. Service resumes tomorrow.".to_string(),
        )
    } else {
        (
            QuotaStatus::Ok,
            format!("{} requests remaining today", quota.remaining),
        )
    };
    Json(RateLimitResponse {
        date: quota.date.to_string(),
        used: quota.used,
        remaining: quota.remaining,
        daily_limit: quota.daily_limit,
        status,
        model: analyst.gateway().model().to_string(),
        message,
    })
}

/// GET /analyze-deep/status
pub(crate) async fn analyze_deep_status<C: ModelClient + 'static>(
    State(analyst): AppState<C>,
) -> Json<StageStatusResponse> {
    Json(StageStatusResponse {
        status: "ready".to_string(),
        model_configured: Some(analyst.gateway().is_configured()),
        max_steps: Some(analyst.settings().max_deep_steps),
        description: "Multi-step analysis: decompose, query, synthesize, chart".to_string(),
    })
}

/// GET /finalize/status
pub(crate) async fn finalize_status<C: ModelClient + 'static>(
    State(analyst): AppState<C>,
) -> Json<StageStatusResponse> {
    Json(StageStatusResponse {
        status: "ready".to_string(),
        model_configured: Some(analyst.gateway().is_configured()),
        max_steps: None,
        description: "Turn a conversation into a publishable project".to_string(),
    })
}

/// GET /validate/status
pub(crate) async fn validate_status<C: ModelClient + 'static>(
    State(analyst): AppState<C>,
) -> Json<StageStatusResponse> {
    Json(StageStatusResponse {
        status: "ready".to_string(),
        model_configured: Some(analyst.gateway().is_configured()),
        max_steps: None,
        description: "Fact-check article claims against the database and model recall".to_string(),
    })
}

/// GET /publish/status
pub(crate) async fn publish_status() -> Json<StageStatusResponse> {
    Json(StageStatusResponse {
        status: "ready".to_string(),
        model_configured: None,
        max_steps: None,
        description: "Publish validated projects to the output folder".to_string(),
    })
}
