use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tabula_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce a consistent HTML error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tabula_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record store error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Reading or writing an uploaded file failed.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(entity: &'static str, id: tabula_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(errors) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, errors.to_string())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Record store errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Rendering and storage ---
            AppError::Template(err) => {
                tracing::error!(error = ?err, "Template rendering failed");
                internal()
            }
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Upload storage failed");
                internal()
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, Html(error_page(status, &message))).into_response()
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations map to 409.
/// - Everything else means the store could not serve the request: 503,
///   with no retry. The next user interaction tries again.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => (
            StatusCode::CONFLICT,
            "A record with the same unique value already exists".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Record store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "The record store is unavailable. Please try again.".to_string(),
            )
        }
    }
}

/// Minimal standalone page; error responses cannot reach the template engine.
fn error_page(status: StatusCode, message: &str) -> String {
    let title = status
        .canonical_reason()
        .unwrap_or("Error")
        .to_string();
    format!(
        "<!doctype html>\
         <html><head><meta charset=\"utf-8\"><title>{code} {title}</title></head>\
         <body><main class=\"error\"><h1>{code} {title}</h1><p>{message}</p>\
         <p><a href=\"/projects\">Back to projects</a></p></main></body></html>",
        code = status.as_u16(),
        title = tera::escape_html(&title),
        message = tera::escape_html(message),
    )
}
