pub mod command;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

pub use command::CommandProcessor;

/// Captured result of one processor run that managed to start.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorReport {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessorReport {
    pub fn outcome(&self) -> ProcessorOutcome {
        if self.exit_code != Some(0) {
            ProcessorOutcome::Failed
        } else if !self.stderr.trim().is_empty() {
            ProcessorOutcome::ErrorOutput
        } else {
            ProcessorOutcome::Succeeded
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessorOutcome {
    Succeeded,
    /// Exited zero but wrote to stderr.
    ErrorOutput,
    /// Non-zero exit or killed by a signal.
    Failed,
}

/// The processor could not be launched at all.
#[derive(Debug)]
pub struct ProcessorError {
    pub message: String,
}

impl std::fmt::Display for ProcessorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProcessorError {}

impl From<String> for ProcessorError {
    fn from(s: String) -> Self {
        ProcessorError { message: s }
    }
}

impl From<&str> for ProcessorError {
    fn from(s: &str) -> Self {
        ProcessorError {
            message: s.to_string(),
        }
    }
}

#[async_trait]
pub trait Processor: Send + Sync {
    fn name(&self) -> String;
    async fn run(&self) -> Result<ProcessorReport, ProcessorError>;
}

/// Run the processor on a detached task and log how it ended.
///
/// The returned handle is the completion future. Callers may await it or drop
/// it; dropping does not cancel the run. No timeout is applied.
pub fn dispatch(
    processor: Arc<dyn Processor>,
) -> JoinHandle<Result<ProcessorReport, ProcessorError>> {
    tokio::spawn(async move {
        let name = processor.name();
        tracing::debug!(processor = %name, "Starting processor");

        let result = processor.run().await;
        log_result(&name, &result);
        result
    })
}

fn log_result(name: &str, result: &Result<ProcessorReport, ProcessorError>) {
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(processor = %name, "Error executing processor: {e}");
            return;
        }
    };

    match report.outcome() {
        ProcessorOutcome::Failed => tracing::error!(
            processor = %name,
            exit_code = ?report.exit_code,
            stderr = %report.stderr.trim_end(),
            "Processor exited unsuccessfully"
        ),
        ProcessorOutcome::ErrorOutput => tracing::error!(
            processor = %name,
            stderr = %report.stderr.trim_end(),
            "Processor wrote to its error stream"
        ),
        ProcessorOutcome::Succeeded => tracing::info!(
            processor = %name,
            stdout = %report.stdout.trim_end(),
            "Processor finished"
        ),
    }
}
