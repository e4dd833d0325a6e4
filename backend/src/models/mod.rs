//! Domain entities for the Q&A service.
//!
//! Questions own an ordered collection of answers conceptually, but each
//! answer is stored as its own record pointing back at its parent id.

pub mod answer;
pub mod question;

pub use answer::{Answer, AnswerId, NewAnswer};
pub use question::{NewQuestion, Question, QuestionId};
