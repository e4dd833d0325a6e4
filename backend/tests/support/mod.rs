#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use qna_backend::db::repositories::LocalRepository;
use qna_backend::db::repository::{
    AnswerRepository, QuestionRepository, RepositoryError, RepositoryResult,
};
use qna_backend::models::{Answer, AnswerId, NewAnswer, NewQuestion, Question, QuestionId};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// =============================================================================
// Test doubles
// =============================================================================

/// Wraps a [`LocalRepository`] and counts calls to the write operations.
#[derive(Clone, Default)]
pub struct CountingRepository {
    pub inner: LocalRepository,
    question_creates: std::sync::Arc<AtomicUsize>,
    answer_creates: std::sync::Arc<AtomicUsize>,
}

impl CountingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question_creates(&self) -> usize {
        self.question_creates.load(Ordering::SeqCst)
    }

    pub fn answer_creates(&self) -> usize {
        self.answer_creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionRepository for CountingRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        QuestionRepository::health_check(&self.inner).await
    }

    async fn create(&self, question: &NewQuestion) -> RepositoryResult<Question> {
        self.question_creates.fetch_add(1, Ordering::SeqCst);
        QuestionRepository::create(&self.inner, question).await
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Question>> {
        self.inner.list_all().await
    }

    async fn get_by_id(&self, id: QuestionId) -> RepositoryResult<Question> {
        QuestionRepository::get_by_id(&self.inner, id).await
    }

    async fn delete(&self, id: QuestionId) -> RepositoryResult<()> {
        QuestionRepository::delete(&self.inner, id).await
    }
}

#[async_trait]
impl AnswerRepository for CountingRepository {
    async fn create(&self, answer: &NewAnswer) -> RepositoryResult<Answer> {
        self.answer_creates.fetch_add(1, Ordering::SeqCst);
        AnswerRepository::create(&self.inner, answer).await
    }

    async fn get_by_id(&self, id: AnswerId) -> RepositoryResult<Answer> {
        AnswerRepository::get_by_id(&self.inner, id).await
    }

    async fn delete(&self, id: AnswerId) -> RepositoryResult<()> {
        AnswerRepository::delete(&self.inner, id).await
    }

    async fn list_by_question(&self, question_id: QuestionId) -> RepositoryResult<Vec<Answer>> {
        self.inner.list_by_question(question_id).await
    }
}

/// Repository whose every operation fails with a query error carrying
/// `SECRET_DETAIL`, used to check nothing internal leaks to clients.
#[derive(Clone, Copy, Default)]
pub struct FailingRepository;

pub const SECRET_DETAIL: &str = "relation \"questions\" does not exist at 10.0.0.7";

fn failure() -> RepositoryError {
    RepositoryError::query("failing_repository", SECRET_DETAIL)
}

#[async_trait]
impl QuestionRepository for FailingRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Err(failure())
    }

    async fn create(&self, _question: &NewQuestion) -> RepositoryResult<Question> {
        Err(failure())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Question>> {
        Err(failure())
    }

    async fn get_by_id(&self, _id: QuestionId) -> RepositoryResult<Question> {
        Err(failure())
    }

    async fn delete(&self, _id: QuestionId) -> RepositoryResult<()> {
        Err(failure())
    }
}

#[async_trait]
impl AnswerRepository for FailingRepository {
    async fn create(&self, _answer: &NewAnswer) -> RepositoryResult<Answer> {
        Err(failure())
    }

    async fn get_by_id(&self, _id: AnswerId) -> RepositoryResult<Answer> {
        Err(failure())
    }

    async fn delete(&self, _id: AnswerId) -> RepositoryResult<()> {
        Err(failure())
    }

    async fn list_by_question(&self, _question_id: QuestionId) -> RepositoryResult<Vec<Answer>> {
        Err(failure())
    }
}

// =============================================================================
// HTTP helpers
// =============================================================================

#[cfg(feature = "http-server")]
pub mod http {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    /// Status, raw body bytes and the body parsed as JSON (if it is JSON).
    pub struct TestResponse {
        pub status: StatusCode,
        pub body: Vec<u8>,
    }

    impl TestResponse {
        pub fn json(&self) -> Value {
            serde_json::from_slice(&self.body).unwrap_or_else(|e| {
                panic!(
                    "body is not json ({}): {:?}",
                    e,
                    String::from_utf8_lossy(&self.body)
                )
            })
        }

        pub fn error(&self) -> String {
            self.json()["error"]
                .as_str()
                .expect("error field")
                .to_string()
        }
    }

    pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse { status, body }
    }

    pub async fn get(app: &Router, uri: &str) -> TestResponse {
        send(app, "GET", uri, None).await
    }

    pub async fn post(app: &Router, uri: &str, body: &str) -> TestResponse {
        send(app, "POST", uri, Some(body)).await
    }

    pub async fn delete(app: &Router, uri: &str) -> TestResponse {
        send(app, "DELETE", uri, None).await
    }
}
