pub mod csv;
pub mod submit;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn form_routes() -> Router<SharedState> {
    Router::new()
        .route("/submit-form", post(submit::submit_form))
        .route("/get-csv-data/{csv_id}", get(csv::get_csv_data))
}
