//! Agency cache — acronym to canonical agency name, persisted as JSON.
//!
//! The store holds no state in memory. Every `get` reads the file and every
//! `put` reloads, merges and rewrites it in full, so edits made to the file
//! between calls are always observed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::ScrapeResult;

/// Default cache file, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = "agency.json";

/// File-backed acronym cache.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Create a store backed by `path`. The file is created on first `put`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Look up the canonical name cached for `acronym` (exact, case-sensitive).
    pub fn get(&self, acronym: &str) -> ScrapeResult<Option<String>> {
        let mut entries = self.load()?;
        let hit = entries.remove(acronym);
        tracing::debug!(
            "agency cache {} for {acronym:?}",
            if hit.is_some() { "hit" } else { "miss" }
        );
        Ok(hit)
    }

    /// Record `name` for `acronym`, rewriting the whole file.
    pub fn put(&self, acronym: &str, name: &str) -> ScrapeResult<()> {
        let mut entries = self.load()?;
        entries.insert(acronym.to_string(), name.to_string());
        self.write(&entries)?;
        tracing::debug!(
            "agency cache stored {acronym:?} -> {name:?} ({} entries)",
            entries.len()
        );
        Ok(())
    }

    /// Read every cached entry. A missing file is an empty cache.
    pub fn load(&self) -> ScrapeResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> ScrapeResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write beside the target and rename so a crash never truncates the cache.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_FILE)
    }
}
