use std::path::Path;

use async_trait::async_trait;

/// Named-file storage used for the submission file and the CSV artifacts.
///
/// No locking is applied. Concurrent `put`s to the same path interleave, and a
/// `get` racing a writer (including the external processor) may observe a
/// partially written file.
#[async_trait]
pub trait Store: Send + Sync {
    /// Replace the whole content at `path`, creating the file if needed.
    async fn put(&self, path: &Path, contents: &[u8]) -> std::io::Result<()>;

    /// Read the whole content at `path`, byte for byte. No encoding is assumed.
    async fn get(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        FileStore
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for FileStore {
    async fn put(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        // Truncating write: never appends, never renames over the target.
        tokio::fs::write(path, contents).await
    }

    async fn get(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}
