use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{answers, questions};
use crate::models::{Answer, AnswerId, Question, QuestionId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuestionRow {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = questions)]
pub struct NewQuestionRow<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnswerRow {
    pub id: i64,
    pub question_id: i64,
    pub user_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = answers)]
pub struct NewAnswerRow<'a> {
    pub question_id: i64,
    pub user_id: &'a str,
    pub text: &'a str,
}

impl QuestionRow {
    pub fn into_question(self, answers: Vec<Answer>) -> Question {
        Question {
            id: QuestionId(self.id),
            text: self.text,
            created_at: self.created_at,
            answers,
        }
    }
}

impl From<AnswerRow> for Answer {
    fn from(row: AnswerRow) -> Self {
        Answer {
            id: AnswerId(row.id),
            question_id: QuestionId(row.question_id),
            user_id: row.user_id,
            text: row.text,
            created_at: row.created_at,
        }
    }
}
