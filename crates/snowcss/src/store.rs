//! Process-scoped cache of loaded configs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use snowcss_core::config::Config;

use crate::Result;
use crate::loader::{LoadConfigOptions, find_nearest_config, load_config};

/// Loaded configs keyed by normalized config file path.
///
/// Entries are never patched: invalidating drops the config and the next
/// lookup loads and indexes it again.
#[derive(Debug, Default)]
pub struct ConfigStore {
    configs: RwLock<HashMap<PathBuf, Arc<Config>>>,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached config.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Arc<Config>> {
        self.configs.read().get(&normalize(path.as_ref())).cloned()
    }

    /// Get a cached config or load it.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<Config>> {
        let key = normalize(path.as_ref());
        if let Some(config) = self.configs.read().get(&key) {
            return Ok(Arc::clone(config));
        }

        let config = load_config(&LoadConfigOptions::exact(&key))?;
        Ok(self.insert(key, config))
    }

    /// Get the config that covers a document.
    ///
    /// Reuses a cached config whose directory contains the document (the
    /// deepest one wins), otherwise discovers the nearest config file and
    /// loads it. Returns `Ok(None)` when no config file exists.
    pub fn get_for_document(
        &self,
        document: impl AsRef<Path>,
        workspace_roots: &[PathBuf],
    ) -> Result<Option<Arc<Config>>> {
        let document = normalize(document.as_ref());

        if let Some(config) = self.find_cached(&document) {
            return Ok(Some(config));
        }

        match find_nearest_config(&document, workspace_roots) {
            Some(path) => self.get_or_load(path).map(Some),
            None => Ok(None),
        }
    }

    /// Store a config under `path`. An existing entry for the same path wins.
    pub fn insert(&self, path: impl AsRef<Path>, config: Config) -> Arc<Config> {
        let key = normalize(path.as_ref());
        let mut configs = self.configs.write();
        Arc::clone(configs.entry(key).or_insert_with(|| Arc::new(config)))
    }

    /// Drop a cached config. Returns whether one was cached.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let removed = self.configs.write().remove(&normalize(path)).is_some();
        if removed {
            tracing::info!("Invalidated Snow config: {}", path.display());
        }
        removed
    }

    /// Drop every cached config. Returns how many were cached.
    pub fn invalidate_all(&self) -> usize {
        let mut configs = self.configs.write();
        let count = configs.len();
        configs.clear();
        tracing::info!("Invalidated {} cached config(s)", count);
        count
    }

    /// Number of cached configs.
    pub fn len(&self) -> usize {
        self.configs.read().len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.configs.read().is_empty()
    }

    /// Paths of the cached configs.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.configs.read().keys().cloned().collect()
    }

    fn find_cached(&self, document: &Path) -> Option<Arc<Config>> {
        self.configs
            .read()
            .iter()
            .filter_map(|(path, config)| Some((path.parent()?, config)))
            .filter(|(dir, _)| document.starts_with(dir))
            .max_by_key(|(dir, _)| dir.components().count())
            .map(|(_, config)| Arc::clone(config))
    }
}

/// Canonical form of a path, or the path itself when it cannot be resolved
/// (e.g. the file was just removed).
fn normalize(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
