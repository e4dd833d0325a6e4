//! Storage port for questions.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewQuestion, Question, QuestionId};

/// Repository trait for question persistence.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Check if the underlying store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store a new question.
    ///
    /// # Returns
    /// * `Ok(Question)` - The stored question with its assigned id and timestamp
    /// * `Err(RepositoryError)` - If the operation fails
    async fn create(&self, question: &NewQuestion) -> RepositoryResult<Question>;

    /// List every stored question in ascending id order.
    ///
    /// Answers are not loaded; each returned question has an empty `answers`.
    async fn list_all(&self) -> RepositoryResult<Vec<Question>>;

    /// Fetch a question together with its answers (ascending answer id).
    ///
    /// # Returns
    /// * `Ok(Question)` - The question with nested answers
    /// * `Err(RepositoryError::NotFound)` - If no question has this id
    /// * `Err(RepositoryError)` - If the operation fails
    async fn get_by_id(&self, id: QuestionId) -> RepositoryResult<Question>;

    /// Delete a question. Its answers are removed along with it.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no question has this id
    async fn delete(&self, id: QuestionId) -> RepositoryResult<()>;
}
