//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Bounded retry while establishing the pool at startup
//! - Automatic migration execution
//! - `ON DELETE CASCADE` from `answers.question_id` to `questions.id`
//!
//! ## Configuration
//!
//! See [`PostgresConfig::from_env`] for the environment variables read.

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;
use std::time::Duration;
use tokio::task;

use crate::db::config::PostgresConfig;
use crate::db::repository::{
    AnswerRepository, QuestionRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Answer, AnswerId, NewAnswer, NewQuestion, Question, QuestionId};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// This blocks while the pool opens its initial connections; async
    /// callers should go through [`PostgresRepository::connect`].
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let pool = Self::build_pool(&config)?;

        {
            let mut conn = pool
                .get()
                .map_err(|e| RepositoryError::from(e).during("run_migrations"))?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool })
    }

    /// Build the pool and run migrations, retrying with the configured
    /// linear backoff while the database is unreachable.
    pub async fn connect(config: &PostgresConfig) -> RepositoryResult<Self> {
        let target = config.redacted_url();
        config
            .retry_policy()
            .run(&target, |_| {
                let config = config.clone();
                async move {
                    task::spawn_blocking(move || Self::new(config))
                        .await
                        .map_err(|e| join_failed("connect", e))?
                }
            })
            .await
    }

    fn build_pool(config: &PostgresConfig) -> RepositoryResult<PgPool> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size.min(config.max_pool_size)))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .max_lifetime(Some(Duration::from_secs(config.max_lifetime_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection(
                    "create_pool",
                    format!("{} (max_size={})", e, config.max_pool_size),
                )
            })
    }

    /// Run pending database migrations, returning the versions applied.
    pub fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<Vec<String>> {
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| RepositoryError::internal("run_migrations", e.to_string()))?;

        let versions: Vec<String> = applied.iter().map(|v| v.to_string()).collect();
        if versions.is_empty() {
            info!("database schema is up to date");
        } else {
            info!("applied migrations: {}", versions.join(", "));
        }
        Ok(versions)
    }

    /// Execute a blocking diesel operation on the blocking thread pool.
    ///
    /// Failures raised inside `f` are tagged with `operation`.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| join_failed(operation, e))?
        .map_err(|e| e.during(operation))
    }
}

fn join_failed(operation: &'static str, err: task::JoinError) -> RepositoryError {
    RepositoryError::internal(operation, format!("blocking task failed: {}", err))
}

fn load_answers(conn: &mut PgConnection, question_id: i64) -> RepositoryResult<Vec<Answer>> {
    let rows = answers::table
        .filter(answers::question_id.eq(question_id))
        .order(answers::id.asc())
        .select(AnswerRow::as_select())
        .load::<AnswerRow>(conn)?;
    Ok(rows.into_iter().map(Answer::from).collect())
}

#[async_trait]
impl QuestionRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1").execute(conn)?;
            Ok(true)
        })
        .await
    }

    async fn create(&self, question: &NewQuestion) -> RepositoryResult<Question> {
        let text = question.text.clone();
        self.with_conn("create_question", move |conn| {
            let row: QuestionRow = diesel::insert_into(questions::table)
                .values(&NewQuestionRow { text: &text })
                .returning(QuestionRow::as_returning())
                .get_result(conn)?;
            Ok(row.into_question(Vec::new()))
        })
        .await
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Question>> {
        self.with_conn("list_questions", |conn| {
            let rows = questions::table
                .order(questions::id.asc())
                .select(QuestionRow::as_select())
                .load::<QuestionRow>(conn)?;
            Ok(rows
                .into_iter()
                .map(|row| row.into_question(Vec::new()))
                .collect())
        })
        .await
    }

    async fn get_by_id(&self, id: QuestionId) -> RepositoryResult<Question> {
        self.with_conn("get_question", move |conn| {
            let row = questions::table
                .find(id.0)
                .select(QuestionRow::as_select())
                .first::<QuestionRow>(conn)
                .optional()?
                .ok_or_else(|| RepositoryError::question_not_found(id))?;

            let answers = load_answers(conn, id.0)?;
            Ok(row.into_question(answers))
        })
        .await
    }

    async fn delete(&self, id: QuestionId) -> RepositoryResult<()> {
        self.with_conn("delete_question", move |conn| {
            let deleted = diesel::delete(questions::table.find(id.0)).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::question_not_found(id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl AnswerRepository for PostgresRepository {
    async fn create(&self, answer: &NewAnswer) -> RepositoryResult<Answer> {
        let answer = answer.clone();
        self.with_conn("create_answer", move |conn| {
            let row: AnswerRow = diesel::insert_into(answers::table)
                .values(&NewAnswerRow {
                    question_id: answer.question_id.0,
                    user_id: &answer.user_id,
                    text: &answer.text,
                })
                .returning(AnswerRow::as_returning())
                .get_result(conn)?;
            Ok(Answer::from(row))
        })
        .await
    }

    async fn get_by_id(&self, id: AnswerId) -> RepositoryResult<Answer> {
        self.with_conn("get_answer", move |conn| {
            answers::table
                .find(id.0)
                .select(AnswerRow::as_select())
                .first::<AnswerRow>(conn)
                .optional()?
                .map(Answer::from)
                .ok_or_else(|| RepositoryError::answer_not_found(id))
        })
        .await
    }

    async fn delete(&self, id: AnswerId) -> RepositoryResult<()> {
        self.with_conn("delete_answer", move |conn| {
            let deleted = diesel::delete(answers::table.find(id.0)).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::answer_not_found(id));
            }
            Ok(())
        })
        .await
    }

    async fn list_by_question(&self, question_id: QuestionId) -> RepositoryResult<Vec<Answer>> {
        self.with_conn("list_answers", move |conn| load_answers(conn, question_id.0))
            .await
    }
}
