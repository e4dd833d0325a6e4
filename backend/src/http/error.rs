//! HTTP error handling and response types.
//!
//! Every failure leaves the server as `{"error": "<message>"}` with a fixed
//! message. Internal details are logged, never sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;
use tracing::{error, info, warn};

use super::dto::ErrorBody;
use crate::services::ServiceError;

/// Entity named in client-facing error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Question,
    Answer,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Question => "question",
            Entity::Answer => "answer",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Body could not be decoded into the expected request shape.
    InvalidJson,
    /// Decoded body failed field validation; carries the client message.
    Validation(String),
    /// Path id was not a positive integer.
    InvalidId(Entity),
    NotFound(Entity),
    /// Any other failure, tagged with the action that failed
    /// (e.g. "create question").
    Internal(&'static str),
}

impl AppError {
    /// Classify a service failure for the given action.
    ///
    /// Not-found conditions become 404s; everything else is logged with its
    /// source and reported as a 500.
    pub fn from_service(err: ServiceError, action: &'static str) -> Self {
        match err {
            ServiceError::QuestionNotFound(_) => AppError::NotFound(Entity::Question),
            ServiceError::AnswerNotFound(_) => AppError::NotFound(Entity::Answer),
            ServiceError::Repository(source) => {
                error!(action, error = %source, "request failed");
                AppError::Internal(action)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidJson | AppError::Validation(_) | AppError::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` field of the response body.
    pub fn message(&self) -> String {
        match self {
            AppError::InvalidJson => "invalid json".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidId(entity) => format!("invalid {} id", entity),
            AppError::NotFound(entity) => format!("{} not found", entity),
            AppError::Internal(action) => format!("failed to {}", action),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        match &self {
            AppError::InvalidJson | AppError::Validation(_) | AppError::InvalidId(_) => {
                warn!(status = status.as_u16(), "rejected request: {}", message);
            }
            AppError::NotFound(_) => {
                info!(status = status.as_u16(), "{}", message);
            }
            // Logged with its source in `from_service`.
            AppError::Internal(_) => {}
        }

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepositoryError;
    use crate::models::{AnswerId, QuestionId};

    #[test]
    fn test_messages() {
        assert_eq!(AppError::InvalidJson.message(), "invalid json");
        assert_eq!(
            AppError::InvalidId(Entity::Answer).message(),
            "invalid answer id"
        );
        assert_eq!(
            AppError::NotFound(Entity::Question).message(),
            "question not found"
        );
        assert_eq!(
            AppError::Internal("list questions").message(),
            "failed to list questions"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidJson.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Validation("text is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound(Entity::Answer).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("get answer").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_service_error_classification() {
        assert!(matches!(
            AppError::from_service(ServiceError::QuestionNotFound(QuestionId(1)), "create answer"),
            AppError::NotFound(Entity::Question)
        ));
        assert!(matches!(
            AppError::from_service(ServiceError::AnswerNotFound(AnswerId(1)), "get answer"),
            AppError::NotFound(Entity::Answer)
        ));

        let err = AppError::from_service(
            ServiceError::Repository(RepositoryError::connection(
                "get_answer",
                "password=hunter2",
            )),
            "get answer",
        );
        assert!(matches!(err, AppError::Internal("get answer")));
        assert!(!err.message().contains("hunter2"));
    }
}
