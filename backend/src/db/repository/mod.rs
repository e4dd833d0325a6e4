//! Repository trait definitions for database operations.
//!
//! The storage port is split into two focused traits, one per entity:
//!
//! - [`error`]: Error types for repository operations
//! - [`question`]: Question CRUD, including the nested-answer fetch
//! - [`answer`]: Answer CRUD and per-question listing
//!
//! # Trait Composition
//!
//! Backends implement both traits on a single type. [`FullRepository`] is
//! implemented automatically for any such type and lets callers split one
//! shared backend into the two ports the services depend on:
//!
//! ```ignore
//! let repo: Arc<dyn FullRepository> = RepositoryFactory::create_local();
//! let questions = repo.clone().into_question_repository();
//! let answers = repo.into_answer_repository();
//! ```

pub mod answer;
pub mod error;
pub mod question;

// Re-export error types
pub use error::{Record, RepositoryError, RepositoryResult};

// Re-export all traits
pub use answer::AnswerRepository;
pub use question::QuestionRepository;

use std::sync::Arc;

/// Composite trait for a backend that stores both questions and answers.
pub trait FullRepository: QuestionRepository + AnswerRepository {
    /// View this backend through its question port.
    fn into_question_repository(self: Arc<Self>) -> Arc<dyn QuestionRepository>;

    /// View this backend through its answer port.
    fn into_answer_repository(self: Arc<Self>) -> Arc<dyn AnswerRepository>;
}

// Blanket implementation: any type implementing both traits is a FullRepository
impl<T> FullRepository for T
where
    T: QuestionRepository + AnswerRepository + 'static,
{
    fn into_question_repository(self: Arc<Self>) -> Arc<dyn QuestionRepository> {
        self
    }

    fn into_answer_repository(self: Arc<Self>) -> Arc<dyn AnswerRepository> {
        self
    }
}
