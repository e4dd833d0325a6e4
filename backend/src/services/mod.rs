//! Service layer for business logic.
//!
//! Services sit between the HTTP handlers and the repository traits. They
//! translate storage "not found" conditions into typed errors and enforce
//! that an answer is only created under an existing question.

pub mod answer;
pub mod error;
pub mod question;

pub use answer::AnswerService;
pub use error::{ServiceError, ServiceResult};
pub use question::QuestionService;

use std::sync::Arc;

use crate::db::repository::FullRepository;

/// Build both services over one shared backend.
pub fn build_services(repo: Arc<dyn FullRepository>) -> (QuestionService, AnswerService) {
    let questions = repo.clone().into_question_repository();
    let answers = repo.into_answer_repository();
    (
        QuestionService::new(questions.clone()),
        AnswerService::new(questions, answers),
    )
}
