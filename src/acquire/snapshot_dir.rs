use crate::config::SourceConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::{page_url, PageSource, Resource};

/// Reads DOM dumps laid out as `{dir}/{SYMBOL}/{slug}.html`.
pub struct SnapshotDirSource {
    dir: PathBuf,
    base_url: String,
}

impl SnapshotDirSource {
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            dir: config.snapshot_dir.clone(),
            base_url: config.base_url.clone(),
        }
    }

    pub fn snapshot_path(&self, resource: Resource, symbol: &str) -> PathBuf {
        self.dir.join(symbol).join(format!("{}.html", resource.slug()))
    }
}

#[async_trait]
impl PageSource for SnapshotDirSource {
    fn page_url(&self, resource: Resource, symbol: &str) -> String {
        page_url(&self.base_url, resource, symbol)
    }

    async fn fetch_page(&self, resource: Resource, symbol: &str) -> Result<String> {
        let path = self.snapshot_path(resource, symbol);
        debug!("Reading snapshot {:?}", path);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("No snapshot at {:?}", path))
    }
}
