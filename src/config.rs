use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub public_dir: PathBuf,
    pub submission_path: PathBuf,
    pub processor: ProcessorCommand,
    /// Working directory for processor runs. `None` inherits the server's.
    pub processor_workdir: Option<PathBuf>,
    pub max_body_size: usize,
    pub log_level: String,
}

/// Fixed command line of the external processor. No per-request arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ProcessorCommand {
    pub fn parse(command: &str) -> Result<Self, String> {
        let mut parts = command.split_whitespace().map(|s| s.to_string());
        let program = parts
            .next()
            .ok_or_else(|| "Processor command must not be empty".to_string())?;

        Ok(ProcessorCommand {
            program,
            args: parts.collect(),
        })
    }
}

impl std::fmt::Display for ProcessorCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("FORMBRIDGE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FORMBRIDGE_HOST: {e}"))?;

        let port: u16 = env_or("PORT", "2000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let public_dir = PathBuf::from(env_or("FORMBRIDGE_PUBLIC_DIR", "public"));
        let submission_path = PathBuf::from(env_or("FORMBRIDGE_SUBMISSION_PATH", "data.json"));

        let processor = ProcessorCommand::parse(&env_or(
            "FORMBRIDGE_PROCESSOR",
            "python similarity_matrix.py",
        ))
        .map_err(|e| format!("Invalid FORMBRIDGE_PROCESSOR: {e}"))?;

        let processor_workdir = std::env::var("FORMBRIDGE_PROCESSOR_WORKDIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let max_body_size: usize = env_or("FORMBRIDGE_MAX_BODY_SIZE", "102400")
            .parse()
            .map_err(|e| format!("Invalid FORMBRIDGE_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("FORMBRIDGE_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            public_dir,
            submission_path,
            processor,
            processor_workdir,
            max_body_size,
            log_level,
        })
    }
}

/// Unset and empty values both fall back to the default.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
