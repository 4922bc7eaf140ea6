//! Process-wide caches: page data, human verdicts, backlinks.
//!
//! Each cache is a moka in-memory map backed by one JSON file on disk. Files
//! are loaded once at startup and written back on terminal search events
//! (and periodically during long searches) with a temp-file + rename so a
//! crashed flush never leaves a half-written file behind.

use moka::future::Cache;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::CacheConfig;
use crate::errors::{WikiError, WikiResult};
use crate::models::PageData;

const PAGE_DATA_FILE: &str = "page_data.json";
const VERDICTS_FILE: &str = "human_verdicts.json";
const BACKLINKS_FILE: &str = "backlinks.json";

pub struct CacheStore {
    data_dir: PathBuf,
    pages: Cache<String, Arc<PageData>>,
    verdicts: Cache<String, bool>,
    backlinks: Cache<String, Arc<Vec<String>>>,
}

impl CacheStore {
    /// Creates the store and loads any existing cache files from `data_dir`.
    /// A missing or unreadable file starts that cache empty.
    pub async fn load(config: &CacheConfig) -> Self {
        let store = Self {
            data_dir: config.data_dir.clone(),
            pages: Cache::builder().max_capacity(config.max_capacity).build(),
            verdicts: Cache::builder().max_capacity(config.max_capacity).build(),
            backlinks: Cache::builder().max_capacity(config.max_capacity).build(),
        };

        if let Err(e) = store.load_from_disk().await {
            tracing::warn!("Starting with empty caches: {e}");
        }

        store
    }

    async fn load_from_disk(&self) -> WikiResult<()> {
        let pages: HashMap<String, (String, Vec<String>)> =
            read_json(&self.data_dir.join(PAGE_DATA_FILE)).await?;
        for (title, (extract, links)) in pages {
            self.pages
                .insert(title, Arc::new(PageData { extract, links }))
                .await;
        }

        let verdicts: HashMap<String, bool> =
            read_json(&self.data_dir.join(VERDICTS_FILE)).await?;
        for (title, verdict) in verdicts {
            self.verdicts.insert(title, verdict).await;
        }

        let backlinks: HashMap<String, Vec<String>> =
            read_json(&self.data_dir.join(BACKLINKS_FILE)).await?;
        for (title, links) in backlinks {
            self.backlinks.insert(title, Arc::new(links)).await;
        }

        tracing::info!(
            pages = self.pages.entry_count(),
            verdicts = self.verdicts.entry_count(),
            backlinks = self.backlinks.entry_count(),
            "Loaded caches from {}",
            self.data_dir.display()
        );

        Ok(())
    }

    pub async fn page(&self, title: &str) -> Option<Arc<PageData>> {
        self.pages.get(title).await
    }

    pub async fn store_page(&self, title: &str, data: PageData) {
        self.pages.insert(title.to_string(), Arc::new(data)).await;
    }

    pub async fn verdict(&self, title: &str) -> Option<bool> {
        self.verdicts.get(title).await
    }

    /// Verdicts are monotone within a process run: the first write for a
    /// title wins and later writes are ignored.
    pub async fn store_verdict(&self, title: &str, is_human: bool) {
        if self.verdicts.get(title).await.is_none() {
            self.verdicts.insert(title.to_string(), is_human).await;
        }
    }

    pub async fn backlinks(&self, title: &str) -> Option<Arc<Vec<String>>> {
        self.backlinks.get(title).await
    }

    pub async fn store_backlinks(&self, title: &str, links: Vec<String>) {
        self.backlinks
            .insert(title.to_string(), Arc::new(links))
            .await;
    }

    /// Writes all three caches to disk atomically (write-then-rename).
    pub async fn flush(&self) -> WikiResult<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;

        let pages: HashMap<String, (String, Vec<String>)> = self
            .pages
            .iter()
            .map(|(title, data)| {
                (
                    title.as_ref().clone(),
                    (data.extract.clone(), data.links.clone()),
                )
            })
            .collect();
        write_json(&self.data_dir.join(PAGE_DATA_FILE), &pages).await?;

        let verdicts: HashMap<String, bool> = self
            .verdicts
            .iter()
            .map(|(title, verdict)| (title.as_ref().clone(), verdict))
            .collect();
        write_json(&self.data_dir.join(VERDICTS_FILE), &verdicts).await?;

        let backlinks: HashMap<String, Vec<String>> = self
            .backlinks
            .iter()
            .map(|(title, links)| (title.as_ref().clone(), links.as_ref().clone()))
            .collect();
        write_json(&self.data_dir.join(BACKLINKS_FILE), &backlinks).await?;

        tracing::debug!(
            pages = pages.len(),
            verdicts = verdicts.len(),
            backlinks = backlinks.len(),
            "Flushed caches to {}",
            self.data_dir.display()
        );

        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned + Default>(path: &Path) -> WikiResult<T> {
    if !path.exists() {
        return Ok(T::default());
    }

    let raw = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&raw)
        .map_err(|e| WikiError::cache(format!("corrupt cache file {}: {e}", path.display())))
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> WikiResult<()> {
    let json = serde_json::to_string(value)?;
    let tmp = path.with_extension("json.tmp");

    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;

    Ok(())
}
