//! Request-level failures and their uniform JSON rendering.
//!
//! Every handled failure becomes `{"status": "error", "reason": ...}` with the
//! status code of its kind. Storage failures are logged and returned as a bare
//! `500` so driver details never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

pub const NOT_FOUND_REASON: &str = "Announcement not found";

/// One problem found while validating a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Path to the offending field, `["__root__"]` for the body itself.
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(field: &str, msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec![field.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    pub fn root(msg: impl Into<String>, kind: &str) -> Self {
        Self::new("__root__", msg, kind)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum Reason {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub reason: Reason,
}

impl ErrorResponse {
    fn new(reason: Reason) -> Self {
        Self {
            status: "error".to_string(),
            reason,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldError>),
    NotFound,
    Database(sqlx::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(Reason::Fields(errors))),
            )
                .into_response(),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(Reason::Message(
                    NOT_FOUND_REASON.to_string(),
                ))),
            )
                .into_response(),
            Self::Database(err) => {
                error!("Database error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
