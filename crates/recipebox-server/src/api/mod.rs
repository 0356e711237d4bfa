// ABOUTME: API module containing all HTTP handler functions for the recipebox JSON API.
// ABOUTME: Also maps store errors onto HTTP statuses with a uniform {"error": ...} body.

pub mod import;
pub mod preferences;
pub mod recipes;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use recipebox_core::{EditLinkError, StorageError, StoreError};

/// An error response: status plus message rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match &err {
            StoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StoreError::Parse(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) | StoreError::PositionOutOfRange { .. } => {
                StatusCode::NOT_FOUND
            }
            StoreError::Storage(_) | StoreError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if !err.is_user_error() {
            tracing::error!("store operation failed: {}", err);
        }
        Self::new(status, err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("storage operation failed: {}", err);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {}", rejection.body_text());
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<EditLinkError> for ApiError {
    fn from(err: EditLinkError) -> Self {
        match err {
            EditLinkError::Encode(_) | EditLinkError::Json(_) => {
                tracing::error!("failed to build edit link: {}", err);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            _ => Self::bad_request(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

/// Parse a recipe id path segment.
pub(crate) fn parse_recipe_id(raw: &str) -> Result<ulid::Ulid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("invalid recipe id"))
}
