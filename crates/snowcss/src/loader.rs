//! Config discovery and loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use snowcss_core::config::{Config, UserConfig};

use crate::{Error, Result};

/// Default config file names, in lookup order.
pub const CONFIG_FILES: [&str; 2] = ["snow.config.toml", "snow.config.json"];

/// On-disk config format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Where [`load_config`] looks for the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadConfigOptions {
    /// Directory to search in. Defaults to the current directory.
    pub root: Option<PathBuf>,
    /// Config file path relative to `root`. Defaults to [`CONFIG_FILES`].
    pub path: Option<PathBuf>,
    /// Exact config file path. `root` and `path` are ignored when set.
    pub exact: Option<PathBuf>,
}

impl LoadConfigOptions {
    /// Load exactly this file.
    pub fn exact(path: impl Into<PathBuf>) -> Self {
        Self {
            exact: Some(path.into()),
            ..Self::default()
        }
    }

    /// Search the default file names in `root`.
    pub fn root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    /// Use a config path relative to the root.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Find the nearest config file by walking up from `file`'s directory.
///
/// The walk stops after checking a directory that is one of `workspace_roots`.
pub fn find_nearest_config(file: impl AsRef<Path>, workspace_roots: &[PathBuf]) -> Option<PathBuf> {
    let mut current = file.as_ref().parent();

    while let Some(dir) = current {
        if let Some(found) = CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
        {
            return Some(found);
        }

        if workspace_roots.iter().any(|root| root == dir) {
            break;
        }

        current = dir.parent();
    }

    None
}

/// Resolve, read and parse a config.
pub fn load_config(options: &LoadConfigOptions) -> Result<Config> {
    let path = resolve_config_path(options)?;
    read_config(&path)
}

/// Read and parse the config file at `path`.
pub fn read_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let user = parse_config(&source, format, path)?;
    let config = Config::new(user)?.with_source(path);

    tracing::info!("Loaded Snow config: {} ({} tokens)", path.display(), config.len());
    Ok(config)
}

/// Parse config text. `path` is only used for error messages.
pub fn parse_config(source: &str, format: ConfigFormat, path: &Path) -> Result<UserConfig> {
    match format {
        ConfigFormat::Toml => toml::from_str(source).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        }),
        ConfigFormat::Json => serde_json::from_str(source).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn resolve_config_path(options: &LoadConfigOptions) -> Result<PathBuf> {
    if let Some(exact) = &options.exact {
        return Ok(exact.clone());
    }

    let root = match &options.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().map_err(|e| Error::io(".", e))?,
    };

    let found = match &options.path {
        Some(path) => Some(root.join(path)).filter(|candidate| candidate.exists()),
        None => CONFIG_FILES
            .iter()
            .map(|name| root.join(name))
            .find(|candidate| candidate.exists()),
    };

    found.ok_or(Error::ConfigNotFound { root })
}
