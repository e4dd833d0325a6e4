//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::{build_services, AnswerService, QuestionService};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub questions: QuestionService,
    pub answers: AnswerService,
}

impl AppState {
    /// Create the state over a single backend serving both entities.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        let (questions, answers) = build_services(repository);
        Self::from_services(questions, answers)
    }

    pub fn from_services(questions: QuestionService, answers: AnswerService) -> Self {
        Self { questions, answers }
    }
}
