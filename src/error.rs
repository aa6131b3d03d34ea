use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Writing the submission file failed.
    Persistence(std::io::Error),
    /// A known CSV artifact could not be read.
    CsvRead(std::io::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Persistence(err) => write!(f, "Persistence Error: {err}"),
            AppError::CsvRead(err) => write!(f, "CSV Read Error: {err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Persistence(err) => {
                tracing::error!("Failed to save submission: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error saving data".to_string(),
                )
            }
            AppError::CsvRead(err) => {
                tracing::error!("Failed to read CSV file: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error reading CSV file".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
