use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Internal Server Error")]
    Anyhow(#[from] anyhow::Error),
}

const PG_UNIQUE_VIOLATION: &str = "23505";

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Unique-constraint violations are caller mistakes (duplicate slug),
    /// not server faults: surface them as validation errors. A pre-insert
    /// existence check can always lose a race to a concurrent writer, so
    /// the constraint itself is the authority.
    pub fn unique_violation(err: sqlx::Error, message: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(PG_UNIQUE_VIOLATION) => {
                Self::Validation(message.into())
            }
            _ => Self::Database(err),
        }
    }
}

// Every failure leaves through the same envelope the success path uses:
// { "success": false, "error": "..." }. Database causes stay server-side.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!(error = ?e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong".to_string())
            }
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
            AppError::Anyhow(ref e) => {
                tracing::error!(error = ?e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong".to_string())
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unique_violations_become_validation_errors() {
        let err = AppError::unique_violation(sqlx::Error::RowNotFound, "duplicate slug");
        assert!(matches!(err, AppError::Database(_)));

        let err = AppError::unique_violation(sqlx::Error::PoolClosed, "duplicate slug");
        assert!(matches!(err, AppError::Database(_)));
    }
}
