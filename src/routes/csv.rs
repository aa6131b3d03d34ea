use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::AppError;
use crate::state::SharedState;

/// `GET /get-csv-data/{csv_id}`
///
/// Re-reads the file on every request. No caching. The body is the file's
/// bytes as stored, whatever their encoding.
pub async fn get_csv_data(
    State(state): State<SharedState>,
    Path(csv_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let path = state
        .csv_table
        .resolve(&csv_id)
        .ok_or_else(|| AppError::NotFound("CSV file not found".to_string()))?;

    let contents = state.store.get(path).await.map_err(AppError::CsvRead)?;

    Ok(([(header::CONTENT_TYPE, "text/plain")], contents))
}
