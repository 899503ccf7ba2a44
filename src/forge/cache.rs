//! On-disk cache for GitHub responses.
//!
//! Entries are raw response bodies keyed by request URL. Write failures are
//! logged, never surfaced; a cold or broken cache just means refetching.
use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use log::*;
use std::path::PathBuf;
use tokio::fs;

use crate::result::Result;

/// Caches raw response bodies keyed by request URL.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Create a cache rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json", BASE64_URL_SAFE_NO_PAD.encode(url)))
    }

    /// Cached body for `url`, if present.
    pub async fn get(&self, url: &str) -> Option<String> {
        fs::read_to_string(self.entry_path(url)).await.ok()
    }

    /// Store `body` for `url`.
    pub async fn put(&self, url: &str, body: &str) {
        if let Err(err) = self.write(url, body).await {
            warn!("failed to write cache entry for {url}: {err}");
        }
    }

    async fn write(&self, url: &str, body: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.entry_path(url), body).await?;
        Ok(())
    }
}
