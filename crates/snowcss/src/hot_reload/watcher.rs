//! File watching for config invalidation.

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebouncedEventKind, Debouncer, new_debouncer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use crate::store::ConfigStore;
use crate::{Error, Result};

/// Event indicating a config file changed.
#[derive(Debug, Clone)]
pub struct ConfigChangeEvent {
    /// Path to the changed file.
    pub path: PathBuf,
    /// Type of change.
    pub kind: ChangeKind,
}

/// Type of file change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File was modified or created.
    Modified,
    /// File was removed.
    Removed,
}

/// Watches config files and invalidates them in a [`ConfigStore`].
///
/// # Example
///
/// ```no_run
/// use snowcss::{ConfigStore, hot_reload::ConfigWatcher};
///
/// # fn main() -> snowcss::Result<()> {
/// let store = ConfigStore::new();
/// let config = store.get_or_load("snow.config.toml")?;
///
/// let mut watcher = ConfigWatcher::new()?;
/// if let Some(path) = config.source() {
///     watcher.watch(path)?;
/// }
///
/// // In your event loop:
/// let changes = watcher.poll();
/// watcher.apply_changes(&store, &changes);
/// # Ok(())
/// # }
/// ```
pub struct ConfigWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<std::result::Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    watched_paths: HashSet<PathBuf>,
}

impl ConfigWatcher {
    /// Create a new config watcher.
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let debouncer = new_debouncer(Duration::from_millis(100), tx)
            .map_err(|e| Error::HotReload(e.to_string()))?;

        Ok(Self {
            debouncer,
            rx,
            watched_paths: HashSet::new(),
        })
    }

    /// Start watching a config file.
    pub fn watch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path
            .as_ref()
            .canonicalize()
            .map_err(|e| Error::io(path.as_ref(), e))?;

        if !self.watched_paths.contains(&path) {
            self.debouncer
                .watcher()
                .watch(&path, RecursiveMode::NonRecursive)
                .map_err(|e| Error::HotReload(e.to_string()))?;

            tracing::info!("Watching Snow config: {}", path.display());
            self.watched_paths.insert(path);
        }

        Ok(())
    }

    /// Stop watching a config file.
    pub fn unwatch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let Ok(path) = path.as_ref().canonicalize() else {
            return Ok(());
        };

        if self.watched_paths.remove(&path) {
            let _ = self.debouncer.watcher().unwatch(&path);
            tracing::info!("Stopped watching Snow config: {}", path.display());
        }

        Ok(())
    }

    /// Drain pending change events for watched files, one per file.
    pub fn poll(&mut self) -> Vec<ConfigChangeEvent> {
        let mut changes = vec![];

        loop {
            match self.rx.try_recv() {
                Ok(Ok(events)) => {
                    for event in events {
                        if event.kind != DebouncedEventKind::Any
                            || !self.watched_paths.contains(&event.path)
                        {
                            continue;
                        }

                        let kind = if event.path.exists() {
                            ChangeKind::Modified
                        } else {
                            ChangeKind::Removed
                        };
                        changes.push(ConfigChangeEvent {
                            path: event.path,
                            kind,
                        });
                    }
                }
                Ok(Err(e)) => {
                    tracing::warn!("File watcher error: {}", e);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("File watcher disconnected");
                    break;
                }
            }
        }

        changes.sort_by(|a, b| a.path.cmp(&b.path));
        changes.dedup_by(|a, b| a.path == b.path);

        changes
    }

    /// Invalidate changed configs in `store`. Returns how many were dropped.
    ///
    /// Configs are not reloaded here; the next lookup rebuilds them.
    pub fn apply_changes(&self, store: &ConfigStore, changes: &[ConfigChangeEvent]) -> usize {
        changes
            .iter()
            .filter(|change| {
                match change.kind {
                    ChangeKind::Modified => {
                        tracing::info!("Snow config changed: {}", change.path.display());
                    }
                    ChangeKind::Removed => {
                        tracing::info!("Snow config removed: {}", change.path.display());
                    }
                }
                store.invalidate(&change.path)
            })
            .count()
    }

    /// Number of watched files.
    pub fn watched_count(&self) -> usize {
        self.watched_paths.len()
    }

    /// The watched paths.
    pub fn watched_paths(&self) -> impl Iterator<Item = &Path> {
        self.watched_paths.iter().map(|p| p.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::tempdir;

    const CONFIG: &str = "[tokens.colors]\nprimary = \"#ff0000\"\n";

    #[test]
    fn watcher_creation() {
        assert!(ConfigWatcher::new().is_ok());
    }

    #[test]
    fn watch_and_unwatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snow.config.toml");
        fs::write(&path, CONFIG).unwrap();

        let mut watcher = ConfigWatcher::new().unwrap();
        watcher.watch(&path).unwrap();
        watcher.watch(&path).unwrap();
        assert_eq!(watcher.watched_count(), 1);

        watcher.unwatch(&path).unwrap();
        assert_eq!(watcher.watched_count(), 0);
    }

    #[test]
    fn watching_a_missing_file_fails() {
        let dir = tempdir().unwrap();
        let mut watcher = ConfigWatcher::new().unwrap();
        assert!(watcher.watch(dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn apply_changes_invalidates_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snow.config.toml");
        fs::write(&path, CONFIG).unwrap();

        let store = ConfigStore::new();
        store.get_or_load(&path).unwrap();

        let watcher = ConfigWatcher::new().unwrap();
        let changes = [ConfigChangeEvent {
            path: path.canonicalize().unwrap(),
            kind: ChangeKind::Modified,
        }];

        assert_eq!(watcher.apply_changes(&store, &changes), 1);
        assert!(store.is_empty());
        assert_eq!(watcher.apply_changes(&store, &changes), 0);
    }
}
