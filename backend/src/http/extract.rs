//! Request extractors.
//!
//! [`JsonBody`] decodes the body regardless of the `Content-Type` header and
//! reports any decode failure as `{"error":"invalid json"}`. [`IdPath`] turns
//! the `{id}` segment into a typed id; anything that is not a positive
//! integer, including segments that fail percent-decoding, is rejected with
//! the entity-specific 400 instead of axum's plain-text rejection.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{AppError, Entity};
use crate::models::{AnswerId, QuestionId};

/// JSON request body.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            debug!(error = %e, "request body is not valid json");
            AppError::InvalidJson.into_response()
        })
    }
}

/// Id types addressable through a `{id}` path segment.
pub trait PathId: Sized {
    const ENTITY: Entity;

    fn from_raw(raw: i64) -> Self;
}

impl PathId for QuestionId {
    const ENTITY: Entity = Entity::Question;

    fn from_raw(raw: i64) -> Self {
        QuestionId::new(raw)
    }
}

impl PathId for AnswerId {
    const ENTITY: Entity = Entity::Answer;

    fn from_raw(raw: i64) -> Self {
        AnswerId::new(raw)
    }
}

/// Typed `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

impl<T, S> FromRequestParts<S> for IdPath<T>
where
    T: PathId,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                debug!(error = %e, "path id could not be extracted");
                AppError::InvalidId(T::ENTITY)
            })?;

        parse_id(&raw).map(IdPath)
    }
}

/// Parse a path segment as a positive integer id.
pub fn parse_id<T: PathId>(raw: &str) -> Result<T, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(T::from_raw(id)),
        _ => Err(AppError::InvalidId(T::ENTITY)),
    }
}
