//! Error type for the HTTP layer and its status code mapping.

use std::error::Error;
use std::fmt;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::service::ServiceError;
use crate::validation::ValidationError;

#[derive(Debug)]
pub enum ApiError {
    /// The request could not be decoded: malformed JSON, a non-numeric id,
    /// or query parameters of the wrong type.
    BadRequest(String),
    /// The submitted form broke one or more field constraints.
    Validation(ValidationError),
    /// The service rejected or failed the operation.
    Service(ServiceError),
}

impl ApiError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Service(ServiceError::DuplicateName { .. }) => StatusCode::CONFLICT,
            ApiError::Service(ServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "{}", msg),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Service(e) => write!(f, "{}", e),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::BadRequest(_) => None,
            ApiError::Validation(e) => Some(e),
            ApiError::Service(e) => Some(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::BadRequest(msg) => {
                tracing::debug!(reason = %msg, "rejected undecodable request");
                json!({ "error": msg })
            }
            ApiError::Validation(e) => {
                tracing::warn!(violations = e.violations.len(), "rejected invalid employee form");
                json!({ "error": self.to_string(), "violations": e.violations })
            }
            ApiError::Service(ServiceError::Store(e)) => {
                tracing::error!(error = %e, "employee store failure");
                json!({ "error": self.to_string() })
            }
            ApiError::Service(_) => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
