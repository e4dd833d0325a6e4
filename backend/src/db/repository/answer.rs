//! Storage port for answers.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Answer, AnswerId, NewAnswer, QuestionId};

/// Repository trait for answer persistence.
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Store a new answer. The parent question is expected to exist.
    async fn create(&self, answer: &NewAnswer) -> RepositoryResult<Answer>;

    /// Fetch a single answer.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no answer has this id
    async fn get_by_id(&self, id: AnswerId) -> RepositoryResult<Answer>;

    /// Delete a single answer.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no answer has this id
    async fn delete(&self, id: AnswerId) -> RepositoryResult<()>;

    /// List the answers of a question in ascending id order.
    ///
    /// An unknown question id yields an empty list, not an error.
    async fn list_by_question(&self, question_id: QuestionId) -> RepositoryResult<Vec<Answer>>;
}
