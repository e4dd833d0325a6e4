//! Answer use cases.

use log::{info, warn};
use std::sync::Arc;

use super::error::{ServiceError, ServiceResult};
use crate::db::repository::{AnswerRepository, QuestionRepository};
use crate::models::{Answer, AnswerId, NewAnswer, QuestionId};

/// Business operations on answers.
///
/// Needs the question port as well, to confirm the parent exists before
/// anything is written.
#[derive(Clone)]
pub struct AnswerService {
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
}

impl AnswerService {
    pub fn new(questions: Arc<dyn QuestionRepository>, answers: Arc<dyn AnswerRepository>) -> Self {
        Self { questions, answers }
    }

    /// Attach a new answer to an existing question.
    ///
    /// A missing parent yields [`ServiceError::QuestionNotFound`] and the
    /// answer store is never touched.
    pub async fn create_answer(
        &self,
        question_id: QuestionId,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> ServiceResult<Answer> {
        if let Err(e) = self.questions.get_by_id(question_id).await {
            if e.is_not_found() {
                warn!("answer rejected: question {} does not exist", question_id);
            }
            return Err(ServiceError::for_question(question_id, e));
        }

        let answer = self
            .answers
            .create(&NewAnswer::new(question_id, user_id, text))
            .await?;
        info!("created answer {} for question {}", answer.id, question_id);
        Ok(answer)
    }

    pub async fn get_answer(&self, id: AnswerId) -> ServiceResult<Answer> {
        self.answers
            .get_by_id(id)
            .await
            .map_err(|e| ServiceError::for_answer(id, e))
    }

    pub async fn delete_answer(&self, id: AnswerId) -> ServiceResult<()> {
        self.answers
            .delete(id)
            .await
            .map_err(|e| ServiceError::for_answer(id, e))?;
        info!("deleted answer {}", id);
        Ok(())
    }
}
