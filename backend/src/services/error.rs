//! Error type shared by the question and answer services.

use crate::db::repository::RepositoryError;
use crate::models::{AnswerId, QuestionId};

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Business-level failures.
///
/// Storage "no matching record" conditions are translated into the two
/// not-found variants; every other repository failure passes through
/// unchanged in [`ServiceError::Repository`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The question does not exist. Also reported when an answer is created
    /// for a missing parent question.
    #[error("question {0} not found")]
    QuestionNotFound(QuestionId),

    #[error("answer {0} not found")]
    AnswerNotFound(AnswerId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::QuestionNotFound(_) | Self::AnswerNotFound(_))
    }

    /// Map a repository error for a question lookup.
    pub(crate) fn for_question(id: QuestionId, err: RepositoryError) -> Self {
        if err.is_not_found() {
            Self::QuestionNotFound(id)
        } else {
            Self::Repository(err)
        }
    }

    /// Map a repository error for an answer lookup.
    pub(crate) fn for_answer(id: AnswerId, err: RepositoryError) -> Self {
        if err.is_not_found() {
            Self::AnswerNotFound(id)
        } else {
            Self::Repository(err)
        }
    }
}
