//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use teambrain_agent::AgentError;
use teambrain_core::AvailabilityError;
use teambrain_persistence::PersistenceError;
use teambrain_relay::RelayError;

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// API error type for consistent error responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or unknown API key.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to touch this resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Upstream model call failed.
    #[error("upstream error: {0}")]
    BadGateway(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Service unavailable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = %status, error = %self, "Request failed");
        }
        let body = Json(json!({
            "error": self.to_string()
        }));
        (status, body).into_response()
    }
}

impl From<AvailabilityError> for ApiError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::InvalidRequest(msg) => ApiError::BadRequest(msg),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { kind, id } => {
                ApiError::NotFound(format!("{} not found: {}", kind, id))
            }
            PersistenceError::InvalidId(id) => {
                ApiError::BadRequest(format!("invalid identifier: {}", id))
            }
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Availability(e) => e.into(),
            RelayError::Persistence(e) => e.into(),
            RelayError::UnknownTeam(id) => ApiError::NotFound(format!("team not found: {}", id)),
            RelayError::InvalidBooking(msg) => ApiError::BadRequest(msg),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Configuration(msg) => ApiError::ServiceUnavailable(msg),
            AgentError::InvalidInput(msg) => ApiError::BadRequest(msg),
            AgentError::ModelInvocation(_) | AgentError::ResponseParse(_) => {
                ApiError::BadGateway(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teambrain_models::TeamId;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("test".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("test".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::ServiceUnavailable("test".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_invalid_request_is_bad_request() {
        let err: ApiError =
            RelayError::Availability(AvailabilityError::InvalidRequest("no".into())).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_team_is_not_found() {
        let err: ApiError = RelayError::UnknownTeam(TeamId::from("team-x")).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "not found: team not found: team-x");
    }

    #[test]
    fn test_unconfigured_assistant_is_unavailable() {
        let err: ApiError = AgentError::Configuration("no key".into()).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
