use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Every failure a handler can answer with.
#[derive(Debug, Display)]
pub enum ApiError {
    /// A required field is missing or holds a value outside the allowed set.
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Business-rule conflict, e.g. a second check-in for the same shift.
    #[display(fmt = "{}", _0)]
    Conflict(String),

    /// Request could not be decoded at all (bad JSON, bad query string).
    #[display(fmt = "{}", _0)]
    BadRequest(String),

    #[display(fmt = "{}: {}", context, source)]
    Store {
        context: &'static str,
        source: sqlx::Error,
    },
}

pub const DUPLICATE_ATTENDANCE: &str = "Anda sudah mengisi daftar hadir untuk shift ini!";

impl ApiError {
    pub fn store(context: &'static str) -> impl FnOnce(sqlx::Error) -> ApiError {
        move |source| {
            tracing::error!(error = %source, "{}", context);
            ApiError::Store { context, source }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Conflicts are answered as 400, the frontend only distinguishes 2xx, 4xx and 5xx.
            ApiError::Validation(_) | ApiError::Conflict(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Store { context, source } => json!({
                "message": context,
                "error": source.to_string(),
            }),
            other => json!({ "message": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// MySQL reports duplicate keys with SQLSTATE 23000.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23000"),
        _ => false,
    }
}
