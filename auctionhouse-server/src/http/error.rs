//! HTTP boundary errors
//!
//! Form problems send the user back where they came from with a danger
//! flash. Bad report parameters get a 400 page, storage failures a 500 page
//! with the detail kept in the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::flash::{self, Flash};
use super::render;
use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Invalid query parameters (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Write refused; redirect to `back` with the message (303)
    Rejected { back: String, message: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn rejected(back: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            back: back.into(),
            message: message.into(),
        }
    }

    /// Map a form validation failure to a redirect back to the form.
    pub fn form(back: &str) -> impl FnOnce(ValidationError) -> Self + '_ {
        move |e| Self::rejected(back, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => render::error_page(StatusCode::BAD_REQUEST, &e.to_string()),
            Self::NotFound { resource, id } => render::error_page(
                StatusCode::NOT_FOUND,
                &format!("{} '{}' not found", resource, id),
            ),
            Self::Rejected { back, message } => {
                tracing::debug!(%back, %message, "form rejected");
                flash::redirect(&back, Flash::danger(message)).into_response()
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                render::error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred. Please try again later.",
                )
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::from(DbError::from(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::InvalidFormat {
            field: "start",
            reason: "expected YYYY-MM-DD",
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::from(DbError::NotFound {
            resource: "participant",
            id: "7".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejected_redirects_with_flash() {
        let err = ApiError::form("/auctions/add")(ValidationError::Empty { field: "name" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/auctions/add?flash=name%20is%20required&level=danger"
        );
    }

    #[tokio::test]
    async fn storage_failure_is_500() {
        let err = ApiError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ApiError::Database(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
