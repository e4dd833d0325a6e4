//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies for questions and answers are the domain models
//! themselves; only request shapes and the small fixed bodies live here.

use serde::{Deserialize, Serialize};

use super::error::AppError;

/// Longest `user_id` the answers table accepts.
pub const MAX_USER_ID_LEN: usize = 64;

/// Request body for `POST /questions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl CreateQuestionRequest {
    /// Returns the question text, rejecting missing or blank values.
    pub fn validate(self) -> Result<String, AppError> {
        match present(self.text) {
            Some(text) => Ok(text),
            None => Err(AppError::Validation("text is required".to_string())),
        }
    }
}

/// Request body for `POST /questions/{id}/answers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAnswerRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Validated answer fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerInput {
    pub user_id: String,
    pub text: String,
}

impl CreateAnswerRequest {
    pub fn validate(self) -> Result<AnswerInput, AppError> {
        let user_id = present(self.user_id);
        let text = present(self.text);

        match (user_id, text) {
            (Some(user_id), Some(text)) => {
                if user_id.chars().count() > MAX_USER_ID_LEN {
                    return Err(AppError::Validation(format!(
                        "user_id must be at most {} characters",
                        MAX_USER_ID_LEN
                    )));
                }
                Ok(AnswerInput { user_id, text })
            }
            (None, Some(_)) => Err(AppError::Validation("user_id is required".to_string())),
            (Some(_), None) => Err(AppError::Validation("text is required".to_string())),
            (None, None) => Err(AppError::Validation(
                "user_id and text are required".to_string(),
            )),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Uniform error body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
