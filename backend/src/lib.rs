//! # Q&A Backend
//!
//! A small question-and-answer service: questions, answers attached to them,
//! and a JSON REST API to create, fetch and delete both.
//!
//! ## Architecture
//!
//! - [`models`]: Domain entities and their ids
//! - [`db`]: Repository traits, Postgres and in-memory backends, factory
//! - [`services`]: Business rules on top of the repositories
//! - [`http`]: Axum router, handlers and serving loop
//! - [`config`]: Process configuration read from the environment

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
