pub mod config;
pub mod csv;
pub mod error;
pub mod models;
pub mod processor;
pub mod routes;
pub mod state;
pub mod store;
pub mod submission;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::csv::CsvTable;
use crate::processor::{CommandProcessor, Processor};
use crate::state::{AppState, SharedState};
use crate::store::FileStore;

/// Build the router with the configured command-line processor.
pub fn build_app(config: Config) -> Result<(Router, SharedState), String> {
    let mut processor = CommandProcessor::new(config.processor.clone());
    if let Some(ref dir) = config.processor_workdir {
        processor = processor.with_workdir(dir.clone());
    }
    build_app_with_processor(config, Arc::new(processor))
}

pub fn build_app_with_processor(
    config: Config,
    processor: Arc<dyn Processor>,
) -> Result<(Router, SharedState), String> {
    let csv_table = CsvTable::new(&config.public_dir)?;

    if !config.public_dir.is_dir() {
        tracing::warn!(
            "Public directory {} does not exist; static files will 404",
            config.public_dir.display()
        );
    }

    let state: SharedState = Arc::new(AppState {
        csv_table,
        store: Arc::new(FileStore::new()),
        processor,
        config,
    });

    let app = Router::new()
        .merge(routes::form_routes())
        .route("/health", axum::routing::get(health))
        // A known path with the wrong method is just another unmatched route.
        .method_not_allowed_fallback(not_found)
        .fallback_service(
            ServeDir::new(&state.config.public_dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(not_found.into_service()),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                )),
        )
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .with_state(state.clone());

    Ok((app, state))
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
