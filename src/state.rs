use std::sync::Arc;

use crate::config::Config;
use crate::csv::CsvTable;
use crate::processor::Processor;
use crate::store::Store;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub csv_table: CsvTable,
    pub store: Arc<dyn Store>,
    pub processor: Arc<dyn Processor>,
}
