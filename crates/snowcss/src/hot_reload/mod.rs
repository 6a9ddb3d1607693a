//! Hot-reload support for config files.
//!
//! This module is only available with the `hot-reload` feature.

mod watcher;

pub use watcher::{ChangeKind, ConfigChangeEvent, ConfigWatcher};
