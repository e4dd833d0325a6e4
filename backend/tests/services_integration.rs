//! Service layer tests over shared repository backends.

mod support;

use std::sync::Arc;

use qna_backend::db::repository::{FullRepository, RepositoryError};
use qna_backend::models::{AnswerId, QuestionId};
use qna_backend::services::{build_services, ServiceError};
use support::{CountingRepository, FailingRepository};

#[tokio::test]
async fn test_services_share_one_backend() {
    let repo = CountingRepository::new();
    let (questions, answers) = build_services(Arc::new(repo.clone()));

    let q = questions.create_question("shared?").await.unwrap();
    answers.create_answer(q.id, "u", "yes").await.unwrap();

    let fetched = questions.get_question_with_answers(q.id).await.unwrap();
    assert_eq!(fetched.answers.len(), 1);
    assert_eq!(repo.question_creates(), 1);
    assert_eq!(repo.answer_creates(), 1);
}

#[tokio::test]
async fn test_missing_parent_skips_answer_store() {
    let repo = CountingRepository::new();
    let (_, answers) = build_services(Arc::new(repo.clone()));

    let err = answers
        .create_answer(QuestionId(11), "u", "t")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::QuestionNotFound(QuestionId(11))));
    assert_eq!(repo.answer_creates(), 0);
}

#[tokio::test]
async fn test_answer_after_question_deleted() {
    let repo = CountingRepository::new();
    let (questions, answers) = build_services(Arc::new(repo.clone()));

    let q = questions.create_question("short lived").await.unwrap();
    let a = answers.create_answer(q.id, "u", "t").await.unwrap();
    questions.delete_question(q.id).await.unwrap();

    assert!(matches!(
        answers.get_answer(a.id).await.unwrap_err(),
        ServiceError::AnswerNotFound(id) if id == a.id
    ));
    assert!(matches!(
        answers.create_answer(q.id, "u", "late").await.unwrap_err(),
        ServiceError::QuestionNotFound(_)
    ));
    assert_eq!(repo.answer_creates(), 1);
}

#[tokio::test]
async fn test_infrastructure_errors_pass_through() {
    let repo: Arc<dyn FullRepository> = Arc::new(FailingRepository);
    let (questions, answers) = build_services(repo);

    let err = questions.list_questions().await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repository(RepositoryError::QueryError { .. })
    ));
    assert!(!err.is_not_found());

    let err = answers.delete_answer(AnswerId(1)).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repository(RepositoryError::QueryError { .. })
    ));
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let (questions, _) = build_services(Arc::new(CountingRepository::new()));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let questions = questions.clone();
            tokio::spawn(async move { questions.create_question(format!("q{}", i)).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);

    let listed = questions.list_questions().await.unwrap();
    let listed_ids: Vec<_> = listed.iter().map(|q| q.id).collect();
    assert_eq!(listed_ids, ids);
}
