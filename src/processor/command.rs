use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::ProcessorCommand;

use super::{Processor, ProcessorError, ProcessorReport};

/// Spawns the configured program with its fixed arguments.
pub struct CommandProcessor {
    command: ProcessorCommand,
    workdir: Option<PathBuf>,
}

impl CommandProcessor {
    pub fn new(command: ProcessorCommand) -> Self {
        Self {
            command,
            workdir: None,
        }
    }

    /// Run in `dir` instead of the server's working directory.
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }
}

#[async_trait]
impl Processor for CommandProcessor {
    fn name(&self) -> String {
        self.command.to_string()
    }

    async fn run(&self) -> Result<ProcessorReport, ProcessorError> {
        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(ref dir) = self.workdir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .await
            .map_err(|e| format!("Failed to run {}: {e}", self.command))?;

        Ok(ProcessorReport {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
