use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::question::QuestionId;

/// Answer identifier, assigned by storage on creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnswerId(pub i64);

impl AnswerId {
    pub fn new(value: i64) -> Self {
        AnswerId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored answer referencing its parent question by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub user_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an answer under an existing question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub question_id: QuestionId,
    pub user_id: String,
    pub text: String,
}

impl NewAnswer {
    pub fn new(question_id: QuestionId, user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            question_id,
            user_id: user_id.into(),
            text: text.into(),
        }
    }
}
