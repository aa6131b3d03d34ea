use tokio::task::JoinHandle;

use crate::error::AppError;
use crate::models::Submission;
use crate::processor::{self, ProcessorError, ProcessorReport};
use crate::state::SharedState;

pub struct PipelineResult {
    /// Completion of the processor run started for this submission.
    pub processor: JoinHandle<Result<ProcessorReport, ProcessorError>>,
}

/// Persist the submission, then start the processor.
///
/// The processor is only dispatched once the write has succeeded.
pub async fn run(state: &SharedState, submission: &Submission) -> Result<PipelineResult, AppError> {
    let json = submission
        .to_pretty_json()
        .map_err(|e| AppError::Persistence(e.into()))?;

    state
        .store
        .put(&state.config.submission_path, json.as_bytes())
        .await
        .map_err(AppError::Persistence)?;

    tracing::debug!(
        "Saved submission to {}",
        state.config.submission_path.display()
    );

    Ok(PipelineResult {
        processor: processor::dispatch(state.processor.clone()),
    })
}
