use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;

/// One cached GET result, stored as a JSON file named by the SHA-256 of
/// the request URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Flat on-disk response cache. Single process, single thread, so no
/// locking: one reader/writer per invocation.
pub struct HttpCache {
    directory: PathBuf,
}

impl HttpCache {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn load(&self, url: &str) -> Option<CachedResponse> {
        let text = fs::read_to_string(self.entry_path(url)).ok()?;
        serde_json::from_str(&text).ok()
    }

    pub fn store(&self, url: &str, entry: &CachedResponse) -> crate::error::Result<()> {
        fs::create_dir_all(&self.directory)?;
        let text = serde_json::to_string(entry)?;
        fs::write(self.entry_path(url), text)?;
        Ok(())
    }

    pub fn clear(&self) -> std::io::Result<()> {
        if self.directory.exists() {
            fs::remove_dir_all(&self.directory)?;
        }
        Ok(())
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let digest = format!("{:x}", Sha256::digest(url.as_bytes()));
        self.directory.join(format!("{}.json", digest))
    }
}
