//! In-memory local repository implementation.
//!
//! This module provides a local implementation of both repository traits
//! suitable for unit testing and local development. All data is stored in
//! ordered maps behind a single lock, so ids come back in ascending order and
//! a question delete can remove its answers atomically.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{Answer, AnswerId, NewAnswer, NewQuestion, Question, QuestionId};

/// In-memory local repository.
///
/// Cloning shares the underlying storage.
///
/// # Example
/// ```
/// use qna_backend::db::repositories::LocalRepository;
/// use qna_backend::db::repository::QuestionRepository;
/// use qna_backend::models::NewQuestion;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let repo = LocalRepository::new();
///     let question = QuestionRepository::create(&repo, &NewQuestion::new("Why?"))
///         .await
///         .unwrap();
///     assert_eq!(question.id.value(), 1);
/// });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    questions: BTreeMap<QuestionId, Question>,
    answers: BTreeMap<AnswerId, Answer>,

    // ID counters
    next_question_id: i64,
    next_answer_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            questions: BTreeMap::new(),
            answers: BTreeMap::new(),
            next_question_id: 1,
            next_answer_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalData {
    fn answers_for(&self, question_id: QuestionId) -> Vec<Answer> {
        self.answers
            .values()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect()
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy, every storage operation fails with a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository and reset the id counters.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of questions stored.
    pub fn question_count(&self) -> usize {
        self.data.read().questions.len()
    }

    /// Get the number of answers stored, across all questions.
    pub fn answer_count(&self) -> usize {
        self.data.read().answers.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &'static str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection(operation, "store marked unhealthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn create(&self, question: &NewQuestion) -> RepositoryResult<Question> {
        self.check_health("create_question")?;

        let mut data = self.data.write();
        let id = QuestionId(data.next_question_id);
        data.next_question_id += 1;

        let stored = Question {
            id,
            text: question.text.clone(),
            created_at: Utc::now(),
            answers: Vec::new(),
        };
        data.questions.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Question>> {
        self.check_health("list_questions")?;

        Ok(self.data.read().questions.values().cloned().collect())
    }

    async fn get_by_id(&self, id: QuestionId) -> RepositoryResult<Question> {
        self.check_health("get_question")?;

        let data = self.data.read();
        let mut question = data
            .questions
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::question_not_found(id))?;
        question.answers = data.answers_for(id);
        Ok(question)
    }

    async fn delete(&self, id: QuestionId) -> RepositoryResult<()> {
        self.check_health("delete_question")?;

        let mut data = self.data.write();
        if data.questions.remove(&id).is_none() {
            return Err(RepositoryError::question_not_found(id));
        }
        // Same cascade the foreign key performs in Postgres.
        data.answers.retain(|_, a| a.question_id != id);
        Ok(())
    }
}

#[async_trait]
impl AnswerRepository for LocalRepository {
    async fn create(&self, answer: &NewAnswer) -> RepositoryResult<Answer> {
        self.check_health("create_answer")?;

        let mut data = self.data.write();
        if !data.questions.contains_key(&answer.question_id) {
            return Err(RepositoryError::query(
                "create_answer",
                format!(
                    "foreign key violation: question {} does not exist",
                    answer.question_id
                ),
            ));
        }

        let id = AnswerId(data.next_answer_id);
        data.next_answer_id += 1;

        let stored = Answer {
            id,
            question_id: answer.question_id,
            user_id: answer.user_id.clone(),
            text: answer.text.clone(),
            created_at: Utc::now(),
        };
        data.answers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: AnswerId) -> RepositoryResult<Answer> {
        self.check_health("get_answer")?;

        self.data
            .read()
            .answers
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::answer_not_found(id))
    }

    async fn delete(&self, id: AnswerId) -> RepositoryResult<()> {
        self.check_health("delete_answer")?;

        match self.data.write().answers.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::answer_not_found(id)),
        }
    }

    async fn list_by_question(&self, question_id: QuestionId) -> RepositoryResult<Vec<Answer>> {
        self.check_health("list_answers")?;

        Ok(self.data.read().answers_for(question_id))
    }
}
