//! Token configuration and the flattened token index.

mod tokens;
mod user;

pub use tokens::{TokenNode, TokenTable};
pub use user::{DEFAULT_ROOT_FONT_SIZE, InjectType, UserConfig};

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::path::Path;
use crate::token::Token;
use crate::values::ModifyContext;

/// A loaded configuration: the user config plus its token index.
///
/// The index maps unprefixed dot paths (`colors.primary`) to tokens whose own
/// path carries the prefix. It is built once and never patched; reloading a
/// config means building a new `Config`.
#[derive(Debug, Clone)]
pub struct Config {
    user: UserConfig,
    prefix: Option<String>,
    source: Option<PathBuf>,
    index: IndexMap<String, Token>,
}

impl Config {
    /// Validate a user config and build its token index.
    pub fn new(user: UserConfig) -> Result<Self> {
        if !user.root_font_size.is_finite() || user.root_font_size <= 0.0 {
            return Err(Error::invalid_config(
                "rootFontSize",
                format!("expected a positive number, got {}", user.root_font_size),
            ));
        }

        let prefix = user
            .prefix
            .as_deref()
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
            .map(str::to_string);

        if let Some(prefix) = &prefix
            && prefix.contains('.')
        {
            return Err(Error::invalid_config(
                "prefix",
                format!("'{prefix}' must not contain '.'"),
            ));
        }

        let mut index = IndexMap::new();
        let mut head = Vec::new();
        index_table(&user.tokens, &mut head, prefix.as_deref(), &mut index);

        tracing::debug!("Indexed {} tokens", index.len());

        Ok(Self {
            user,
            prefix,
            source: None,
            index,
        })
    }

    /// Record the file this config was loaded from.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The file this config was loaded from, if any.
    pub fn source(&self) -> Option<&std::path::Path> {
        self.source.as_deref()
    }

    /// The user config the index was built from.
    pub fn user_config(&self) -> &UserConfig {
        &self.user
    }

    /// The effective prefix (empty prefixes are `None`).
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Injection strategy.
    pub fn inject(&self) -> InjectType {
        self.user.inject
    }

    /// Root font size in pixels.
    pub fn root_font_size(&self) -> f64 {
        self.user.root_font_size
    }

    /// Context for applying modifiers.
    pub fn modify_context(&self) -> ModifyContext {
        ModifyContext {
            root_font_size: self.user.root_font_size,
        }
    }

    /// Look up a token by path.
    ///
    /// Paths are written without the prefix. A path that starts with the
    /// prefix segment is also accepted.
    pub fn get_by_path(&self, path: &Path) -> Option<&Token> {
        if let Some(token) = self.index.get(&path.to_dot_path()) {
            return Some(token);
        }

        let prefix = self.prefix.as_deref()?;
        match path.segments() {
            [first, rest @ ..] if first == prefix && !rest.is_empty() => {
                self.index.get(&rest.join("."))
            }
            _ => None,
        }
    }

    /// Look up a token by its dot path.
    pub fn get(&self, dot_path: &str) -> Option<&Token> {
        self.get_by_path(&Path::from_dot_path(dot_path))
    }

    /// All tokens in index order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.index.values()
    }

    /// Index keys in index order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Index one table: its leaves in declaration order, then its nested tables.
fn index_table(
    table: &TokenTable,
    head: &mut Vec<String>,
    prefix: Option<&str>,
    index: &mut IndexMap<String, Token>,
) {
    for (key, node) in table {
        let Some(raw) = node.leaf_value() else {
            continue;
        };

        head.push(key.clone());
        let key = head.join(".");
        let path = match prefix {
            Some(prefix) => Path::new(head.iter().cloned()).with_prefix(prefix),
            None => Path::new(head.iter().cloned()),
        };
        head.pop();

        if index.insert(key.clone(), Token::new(path, raw)).is_some() {
            tracing::warn!("Token '{}' is defined more than once, keeping the last", key);
        }
    }

    for (key, node) in table {
        if let Some(nested) = node.as_table() {
            head.push(key.clone());
            index_table(nested, head, prefix, index);
            head.pop();
        }
    }
}
