//! Generation history: bounded newest-first list persisted as JSON
//!
//! The whole list is rewritten on every change. Writes go through a
//! temporary sibling file that is renamed over the target, so the file on
//! disk is always either the previous or the new list.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::models::GeneratedContent;

/// Maximum number of entries kept
pub const HISTORY_LIMIT: usize = 50;

/// Ordered history, newest first, never longer than `HISTORY_LIMIT`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<GeneratedContent>);

impl History {
    /// Build from entries ordered newest first, dropping the overflow
    pub fn from_entries(mut entries: Vec<GeneratedContent>) -> Self {
        entries.truncate(HISTORY_LIMIT);
        Self(entries)
    }

    /// Insert at the head, evicting the oldest entries past the limit
    pub fn push(&mut self, item: GeneratedContent) {
        self.0.insert(0, item);
        self.0.truncate(HISTORY_LIMIT);
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c.id != id);
        self.0.len() != before
    }

    /// Find by exact id, or by an unambiguous id prefix
    pub fn find(&self, query: &str) -> Option<&GeneratedContent> {
        if let Some(exact) = self.0.iter().find(|c| c.id == query) {
            return Some(exact);
        }
        if query.is_empty() {
            return None;
        }
        let mut matches = self.0.iter().filter(|c| c.id.starts_with(query));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[GeneratedContent] {
        &self.0
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Durable storage for the history list
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Open the store at the configured location
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::at(config.history_path()?))
    }

    /// Open the store at a specific path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the history file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored history. Missing or unreadable data yields an empty history.
    pub fn load(&self) -> History {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return History::default(),
            Err(e) => {
                tracing::warn!("Failed to read history {}: {}", self.path.display(), e);
                return History::default();
            }
        };

        match serde_json::from_str::<Vec<GeneratedContent>>(&content) {
            Ok(entries) => History::from_entries(entries),
            Err(e) => {
                tracing::warn!("Ignoring corrupt history {}: {}", self.path.display(), e);
                History::default()
            }
        }
    }

    /// Overwrite the stored history with `history`
    pub fn persist(&self, history: &History) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create history directory")?;
        }

        let json = serde_json::to_vec_pretty(history).context("Failed to serialize history")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).context("Failed to write history")?;
        fs::rename(&tmp, &self.path).context("Failed to replace history file")?;

        tracing::debug!("Persisted {} history entries", history.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample;
    use tempfile::tempdir;

    #[test]
    fn test_push_is_bounded_and_evicts_oldest() {
        let mut history = History::default();
        for i in 0..(HISTORY_LIMIT + 7) {
            history.push(sample(&i.to_string()));
            assert!(history.len() <= HISTORY_LIMIT);
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.entries()[0].id, (HISTORY_LIMIT + 6).to_string());
        // 0..=6 were evicted
        assert!(history.find("6").is_none());
        assert_eq!(history.entries().last().unwrap().id, "7");
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut history = History::default();
        history.push(sample("a"));
        history.push(sample("b"));

        assert!(history.remove("a"));
        let after_first = history.clone();
        assert!(!history.remove("a"));
        assert_eq!(history, after_first);
    }

    #[test]
    fn test_find_by_prefix() {
        let mut history = History::default();
        history.push(sample("abc123"));
        history.push(sample("abd456"));

        assert_eq!(history.find("abc123").unwrap().id, "abc123");
        assert_eq!(history.find("abd").unwrap().id, "abd456");
        assert!(history.find("ab").is_none());
        assert!(history.find("").is_none());
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::at(dir.path().join("history.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{not json").unwrap();
        assert!(HistoryStore::at(&path).load().is_empty());

        fs::write(&path, r#"[{"id": "x"}]"#).unwrap();
        assert!(HistoryStore::at(&path).load().is_empty());
    }

    #[test]
    fn test_persist_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::at(dir.path().join("nested").join("history.json"));

        let mut history = History::default();
        for i in 0..HISTORY_LIMIT {
            let mut item = sample(&format!("id-{i}"));
            item.media_url = (i % 3 == 0).then(|| format!("https://example.com/{i}.jpg"));
            history.push(item);
        }
        store.persist(&history).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, history);

        store.persist(&loaded).unwrap();
        assert_eq!(store.load(), history);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_load_truncates_oversized_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        let entries: Vec<_> = (0..60).map(|i| sample(&i.to_string())).collect();
        fs::write(&path, serde_json::to_string(&entries).unwrap()).unwrap();

        let loaded = HistoryStore::at(&path).load();
        assert_eq!(loaded.len(), HISTORY_LIMIT);
        assert_eq!(loaded.entries()[0].id, "0");
    }

    #[test]
    fn test_persist_overwrites() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::at(dir.path().join("history.json"));

        let mut history = History::default();
        history.push(sample("a"));
        history.push(sample("b"));
        store.persist(&history).unwrap();

        history.remove("a");
        store.persist(&history).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entries()[0].id, "b");
    }
}
