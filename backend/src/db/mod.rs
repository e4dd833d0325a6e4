//! Database module for question and answer storage.
//!
//! This module provides abstractions for database operations via the Repository pattern,
//! allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (http/) - routing, decoding, status codes   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - business rules             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - storage ports        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │                              │
//! ┌───▼──────────────┐    ┌──────────▼───────┐
//! │ Postgres (Diesel) │    │ Local (in-memory)│
//! └──────────────────┘    └──────────────────┘
//! ```
//!
//! # Modules
//! - `repository`: Trait definitions and error types
//! - `repositories::postgres`: Postgres implementation with Diesel ORM
//! - `repositories::local`: In-memory implementation for tests and local development
//! - `factory`: Factory for creating repository instances
//! - `config` / `repo_config`: Environment and TOML configuration
//! - `retry`: Startup connection retry policy

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod config;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod retry;

pub use config::PostgresConfig;
pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    AnswerRepository, FullRepository, QuestionRepository, Record, RepositoryError,
    RepositoryResult,
};
pub use retry::ConnectRetryPolicy;
