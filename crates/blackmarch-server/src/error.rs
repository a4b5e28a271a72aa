//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use blackmarch_commerce::{CommerceError, FieldError};
use blackmarch_db::DbError;
use serde_json::json;
use thiserror::Error;

use crate::render;

/// Errors returned by handlers, rendered as `{ "error": ... }`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Payload failed validation; the details list every rejected field.
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Request conflicts with the current stock.
    #[error("{0}")]
    Conflict(String),

    /// Store or runtime failure. The message never carries the cause.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Map a store failure while trying to `action` ("fetch products").
    ///
    /// Domain errors keep their status. Anything else is logged with its
    /// cause and reported as "Failed to {action}".
    pub fn store(action: &str, err: DbError) -> Self {
        match err {
            DbError::Commerce(err) => err.into(),
            DbError::NotFound => ApiError::NotFound("Product not found".to_string()),
            other => {
                tracing::error!(error = %other, "Failed to {}", action);
                ApiError::Internal(format!("Failed to {}", action))
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CommerceError> for ApiError {
    fn from(err: CommerceError) -> Self {
        match err {
            CommerceError::Validation(details) => ApiError::Validation {
                message: "Validation failed".to_string(),
                details,
            },
            CommerceError::ProductNotFound(_) => ApiError::NotFound("Product not found".to_string()),
            CommerceError::OutOfStock(_) => ApiError::Conflict(err.to_string()),
            CommerceError::InvalidFormat(_)
            | CommerceError::InvalidCategoryType(_)
            | CommerceError::InvalidQuantity(_)
            | CommerceError::QuantityExceedsLimit(..)
            | CommerceError::EmptyCart
            | CommerceError::InvalidPhoneNumber(_) => ApiError::BadRequest(err.to_string()),
            CommerceError::Overflow => {
                tracing::error!(error = %err, "Order total could not be computed");
                ApiError::Internal("Failed to compute order total".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation { message, details } => json!({
                "error": message,
                "details": details,
            }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Error for HTML routes: same statuses as [`ApiError`], rendered as a page.
#[derive(Debug)]
pub struct PageError(pub ApiError);

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        PageError(err)
    }
}

impl From<CommerceError> for PageError {
    fn from(err: CommerceError) -> Self {
        PageError(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        (status, Html(render::error_page(status, &self.0.to_string()))).into_response()
    }
}
