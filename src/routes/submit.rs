use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use crate::error::AppError;
use crate::models::Submission;
use crate::state::SharedState;
use crate::submission::{parser, pipeline};

/// `POST /submit-form`
///
/// Responds once the submission is on disk. The processor run it starts is
/// not awaited and its outcome only reaches the logs.
pub async fn submit_form(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    let fields = parser::parse_body(content_type, &body).map_err(|e| {
        tracing::debug!("Rejected form body: {e}");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    // Detach: the processor keeps running after the response is sent.
    let _ = pipeline::run(&state, &Submission::new(fields)).await?;

    Ok(StatusCode::OK)
}
