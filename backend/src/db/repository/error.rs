//! Storage failures.
//!
//! Adapters report everything through [`RepositoryError`]. Services branch on
//! [`RepositoryError::NotFound`] only; the other variants reach the HTTP layer
//! untouched and end up as a logged 500.

use std::fmt;

use crate::models::{AnswerId, QuestionId};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Table a lookup came back empty from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Question,
    Answer,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Record::Question => "question",
            Record::Answer => "answer",
        })
    }
}

/// Error type for repository operations.
///
/// `operation` names the repository call that failed (`create_answer`,
/// `delete_question`, ...) so log lines can be traced back to a route.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Store unreachable, or no pooled connection could be checked out.
    #[error("{operation}: connection failed: {message}")]
    ConnectionError {
        operation: &'static str,
        message: String,
    },

    /// Statement rejected by the store, constraint violations included.
    #[error("{operation}: query failed: {message}")]
    QueryError {
        operation: &'static str,
        message: String,
    },

    /// No row with this id.
    #[error("{record} {id} not found")]
    NotFound { record: Record, id: i64 },

    /// Unusable `repository.toml` or environment settings.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    #[error("{operation}: {message}")]
    InternalError {
        operation: &'static str,
        message: String,
    },
}

impl RepositoryError {
    pub fn connection(operation: &'static str, message: impl Into<String>) -> Self {
        Self::ConnectionError {
            operation,
            message: message.into(),
        }
    }

    pub fn query(operation: &'static str, message: impl Into<String>) -> Self {
        Self::QueryError {
            operation,
            message: message.into(),
        }
    }

    pub fn internal(operation: &'static str, message: impl Into<String>) -> Self {
        Self::InternalError {
            operation,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }

    pub fn question_not_found(id: QuestionId) -> Self {
        Self::NotFound {
            record: Record::Question,
            id: id.value(),
        }
    }

    pub fn answer_not_found(id: AnswerId) -> Self {
        Self::NotFound {
            record: Record::Answer,
            id: id.value(),
        }
    }

    /// Whether this is the distinguished "no matching record" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Name the repository call on errors raised below it.
    ///
    /// Not-found and configuration errors carry no operation and are
    /// returned unchanged.
    pub fn during(mut self, op: &'static str) -> Self {
        if let Self::ConnectionError { operation, .. }
        | Self::QueryError { operation, .. }
        | Self::InternalError { operation, .. } = &mut self
        {
            *operation = op;
        }
        self
    }
}

/// Diesel errors surface from inside a query closure before the repository
/// call is known; [`RepositoryError::during`] fills it in afterwards.
#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::Error;

        match err {
            Error::DatabaseError(kind, info) => {
                Self::query("query", format!("{:?}: {}", kind, info.message()))
            }
            Error::DeserializationError(e) | Error::SerializationError(e) => {
                Self::internal("query", format!("row conversion failed: {}", e))
            }
            other => Self::query("query", other.to_string()),
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::connection("get_connection", err.to_string())
    }
}
