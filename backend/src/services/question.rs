//! Question use cases.

use log::{debug, info};
use std::sync::Arc;

use super::error::{ServiceError, ServiceResult};
use crate::db::repository::QuestionRepository;
use crate::models::{NewQuestion, Question, QuestionId};

/// Business operations on questions.
///
/// Input validation happens at the HTTP boundary; this layer trusts the
/// values it is given.
#[derive(Clone)]
pub struct QuestionService {
    repo: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(repo: Arc<dyn QuestionRepository>) -> Self {
        Self { repo }
    }

    /// Store a new question.
    pub async fn create_question(&self, text: impl Into<String>) -> ServiceResult<Question> {
        let question = self.repo.create(&NewQuestion::new(text)).await?;
        info!("created question {}", question.id);
        Ok(question)
    }

    /// All questions in ascending id order, without their answers.
    pub async fn list_questions(&self) -> ServiceResult<Vec<Question>> {
        let questions = self.repo.list_all().await?;
        debug!("listed {} questions", questions.len());
        Ok(questions)
    }

    /// Fetch one question together with its answers.
    pub async fn get_question_with_answers(&self, id: QuestionId) -> ServiceResult<Question> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| ServiceError::for_question(id, e))
    }

    /// Delete a question. Its answers go with it.
    pub async fn delete_question(&self, id: QuestionId) -> ServiceResult<()> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| ServiceError::for_question(id, e))?;
        info!("deleted question {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::{AnswerRepository, RepositoryError};
    use crate::models::NewAnswer;

    fn service() -> (LocalRepository, QuestionService) {
        let repo = LocalRepository::new();
        let service = QuestionService::new(Arc::new(repo.clone()));
        (repo, service)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (_, service) = service();
        service.create_question("first").await.unwrap();
        service.create_question("second").await.unwrap();

        let all = service.list_questions().await.unwrap();
        let texts: Vec<&str> = all.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_get_includes_answers() {
        let (repo, service) = service();
        let q = service.create_question("q").await.unwrap();
        AnswerRepository::create(&repo, &NewAnswer::new(q.id, "u", "a"))
            .await
            .unwrap();

        let fetched = service.get_question_with_answers(q.id).await.unwrap();
        assert_eq!(fetched.answers.len(), 1);
        assert_eq!(fetched.answers[0].user_id, "u");
    }

    #[tokio::test]
    async fn test_missing_question_is_not_found() {
        let (_, service) = service();
        let err = service
            .get_question_with_answers(QuestionId(42))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::QuestionNotFound(QuestionId(42))));

        let err = service.delete_question(QuestionId(42)).await.unwrap_err();
        assert!(matches!(err, ServiceError::QuestionNotFound(QuestionId(42))));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (repo, service) = service();
        let q = service.create_question("q").await.unwrap();

        service.delete_question(q.id).await.unwrap();
        assert_eq!(repo.question_count(), 0);
        assert!(service.delete_question(q.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_storage_failure_passes_through() {
        let (repo, service) = service();
        repo.set_healthy(false);

        let err = service.list_questions().await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::ConnectionError { .. })
        ));
    }
}
