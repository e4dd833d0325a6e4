//! HTTP handlers for the REST API.
//!
//! Each handler parses its inputs, delegates to the service layer and maps
//! the outcome to a status code. Error classification lives in [`AppError`].

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::dto::{CreateAnswerRequest, CreateQuestionRequest, HealthResponse};
use super::error::AppError;
use super::extract::{IdPath, JsonBody};
use super::state::AppState;
use crate::models::{Answer, AnswerId, Question, QuestionId};

/// Result type for handlers.
pub type HandlerResult<T> = Result<T, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Liveness only. Storage is not consulted.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// =============================================================================
// Questions
// =============================================================================

/// GET /questions
///
/// List all questions in ascending id order. Answers are not included.
pub async fn list_questions(State(state): State<AppState>) -> HandlerResult<Json<Vec<Question>>> {
    let questions = state
        .questions
        .list_questions()
        .await
        .map_err(|e| AppError::from_service(e, "list questions"))?;
    Ok(Json(questions))
}

/// POST /questions
pub async fn create_question(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateQuestionRequest>,
) -> HandlerResult<(StatusCode, Json<Question>)> {
    let text = request.validate()?;

    let question = state
        .questions
        .create_question(text)
        .await
        .map_err(|e| AppError::from_service(e, "create question"))?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// GET /questions/{id}
///
/// Fetch a question together with its answers.
pub async fn get_question(
    State(state): State<AppState>,
    IdPath(id): IdPath<QuestionId>,
) -> HandlerResult<Json<Question>> {
    let question = state
        .questions
        .get_question_with_answers(id)
        .await
        .map_err(|e| AppError::from_service(e, "get question"))?;
    Ok(Json(question))
}

/// DELETE /questions/{id}
pub async fn delete_question(
    State(state): State<AppState>,
    IdPath(id): IdPath<QuestionId>,
) -> HandlerResult<impl IntoResponse> {
    state
        .questions
        .delete_question(id)
        .await
        .map_err(|e| AppError::from_service(e, "delete question"))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Answers
// =============================================================================

/// POST /questions/{id}/answers
///
/// The id is extracted before the body is decoded, so a bad id wins over a
/// bad body.
pub async fn create_answer(
    State(state): State<AppState>,
    IdPath(question_id): IdPath<QuestionId>,
    JsonBody(request): JsonBody<CreateAnswerRequest>,
) -> HandlerResult<(StatusCode, Json<Answer>)> {
    let input = request.validate()?;

    let answer = state
        .answers
        .create_answer(question_id, input.user_id, input.text)
        .await
        .map_err(|e| AppError::from_service(e, "create answer"))?;
    Ok((StatusCode::CREATED, Json(answer)))
}

/// GET /answers/{id}
pub async fn get_answer(
    State(state): State<AppState>,
    IdPath(id): IdPath<AnswerId>,
) -> HandlerResult<Json<Answer>> {
    let answer = state
        .answers
        .get_answer(id)
        .await
        .map_err(|e| AppError::from_service(e, "get answer"))?;
    Ok(Json(answer))
}

/// DELETE /answers/{id}
pub async fn delete_answer(
    State(state): State<AppState>,
    IdPath(id): IdPath<AnswerId>,
) -> HandlerResult<impl IntoResponse> {
    state
        .answers
        .delete_answer(id)
        .await
        .map_err(|e| AppError::from_service(e, "delete answer"))?;
    Ok(StatusCode::NO_CONTENT)
}
