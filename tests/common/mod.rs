use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tempfile::TempDir;
use tokio::sync::{mpsc, Mutex};

use formbridge::config::{Config, ProcessorCommand};
use formbridge::processor::{Processor, ProcessorError, ProcessorReport};

/// Processor that records each run instead of spawning anything.
pub struct RecordingProcessor {
    runs: AtomicUsize,
    tx: mpsc::UnboundedSender<()>,
}

#[async_trait]
impl Processor for RecordingProcessor {
    fn name(&self) -> String {
        "recording".to_string()
    }

    async fn run(&self) -> Result<ProcessorReport, ProcessorError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        let _ = self.tx.send(());
        Ok(ProcessorReport {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

/// A running test server backed by a temporary directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub submission_path: PathBuf,
    pub public_dir: PathBuf,
    processor: Arc<RecordingProcessor>,
    runs_rx: Mutex<mpsc::UnboundedReceiver<()>>,
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body to /submit-form, return (body text, status).
    pub async fn submit_json(&self, data: &serde_json::Value) -> (String, StatusCode) {
        let resp = self
            .client
            .post(self.url("/submit-form"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    /// POST form-urlencoded fields to /submit-form, return (body text, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (String, StatusCode) {
        let resp = self
            .client
            .post(self.url("/submit-form"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    /// GET a path, return (body text, status).
    pub async fn get(&self, path: &str) -> (String, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    /// GET a path, return (raw body bytes, status).
    pub async fn get_bytes(&self, path: &str) -> (Vec<u8>, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body = resp.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        (body, status)
    }

    pub fn write_public(&self, name: &str, contents: impl AsRef<[u8]>) {
        std::fs::write(self.public_dir.join(name), contents).expect("write public file");
    }

    pub fn read_submission(&self) -> String {
        std::fs::read_to_string(&self.submission_path).expect("read submission file")
    }

    pub fn processor_runs(&self) -> usize {
        self.processor.runs.load(Ordering::SeqCst)
    }

    /// Wait for the next processor run. Returns false on timeout.
    pub async fn wait_for_run(&self, timeout: Duration) -> bool {
        let mut rx = self.runs_rx.lock().await;
        matches!(tokio::time::timeout(timeout, rx.recv()).await, Ok(Some(())))
    }
}

/// Spawn a test app whose submission file lives in a fresh temp directory.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

fn test_config(dir: &TempDir) -> Config {
    let public_dir = dir.path().join("public");
    std::fs::create_dir_all(&public_dir).expect("create public dir");

    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        public_dir,
        submission_path: dir.path().join("data.json"),
        processor: ProcessorCommand {
            program: "true".to_string(),
            args: vec![],
        },
        processor_workdir: None,
        max_body_size: 102_400,
        log_level: "warn".to_string(),
    }
}

/// Serve `app` on a random local port.
async fn serve(app: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    addr
}

/// Spawn a test app, letting the caller adjust the config first.
pub async fn spawn_app_with(customize: impl FnOnce(&mut Config)) -> TestApp {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut config = test_config(&dir);
    customize(&mut config);
    let public_dir = config.public_dir.clone();

    let (tx, rx) = mpsc::unbounded_channel();
    let processor = Arc::new(RecordingProcessor {
        runs: AtomicUsize::new(0),
        tx,
    });

    let submission_path = config.submission_path.clone();
    let (app, _state) = formbridge::build_app_with_processor(config, processor.clone())
        .expect("Failed to build app");

    let addr = serve(app).await;

    TestApp {
        addr,
        client: Client::new(),
        submission_path,
        public_dir,
        processor,
        runs_rx: Mutex::new(rx),
        _dir: dir,
    }
}

/// Spawn the app with its real command-line processor.
///
/// Returns the server address and the temp dir holding its files.
#[allow(dead_code)]
pub async fn spawn_command_app(customize: impl FnOnce(&mut Config)) -> (SocketAddr, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut config = test_config(&dir);
    customize(&mut config);

    let (app, _state) = formbridge::build_app(config).expect("Failed to build app");
    (serve(app).await, dir)
}
