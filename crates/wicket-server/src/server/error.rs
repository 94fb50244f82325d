//! Mapping pipeline failures to HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use wicket_analyst::{AnalystError, PublishError};
use wicket_llm::GatewayError;

/// Every handler error. Rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Analyst(AnalystError),
    /// The request body was missing, not JSON, or the wrong shape.
    Body(JsonRejection),
}

impl From<AnalystError> for ApiError {
    fn from(error: AnalystError) -> Self {
        Self::Analyst(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

const fn status_for(error: &AnalystError) -> StatusCode {
    match error {
        AnalystError::Gateway(GatewayError::QuotaExceeded { .. } | GatewayError::RateLimited { .. }) => {
            StatusCode::TOO_MANY_REQUESTS
        }
        AnalystError::Publish(PublishError::NotReady { .. } | PublishError::UnsafePath(_)) => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Self::Analyst(error) => (status_for(error), error.to_string()),
            Self::Body(rejection) => (rejection.status(), rejection.body_text()),
        };
        if status.is_server_error() {
            tracing::error!(%status, %detail, "request failed");
        } else {
            tracing::warn!(%status, %detail, "request rejected");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wicket_core::enums::Recommendation;
    use wicket_core::errors::CoreError;

    #[test]
    fn quota_and_rate_limits_are_429() {
        let quota = AnalystError::Gateway(GatewayError::QuotaExceeded { daily_limit: 950 });
        let limited = AnalystError::Gateway(GatewayError::RateLimited { attempts: 3 });
        assert_eq!(status_for(&quota), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_for(&limited), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn publish_refusals_are_400() {
        let not_ready = AnalystError::Publish(PublishError::NotReady {
            recommendation: Recommendation::MajorIssues,
            score: 40.0,
        });
        let unsafe_path =
            AnalystError::Publish(PublishError::UnsafePath(CoreError::UnsafePathComponent("..".into())));
        assert_eq!(status_for(&not_ready), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&unsafe_path), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_key_is_500() {
        let error = AnalystError::Gateway(GatewayError::NotConfigured);
        assert_eq!(status_for(&error), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
