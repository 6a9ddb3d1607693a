//! Design tokens.

use crate::path::Path;
use crate::utils::hash;
use crate::values::{TokenValue, parse_values};

/// A token: its full path, the raw CSS value, and that value's parsed components.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    path: Path,
    raw: String,
    values: Vec<TokenValue>,
}

impl Token {
    /// Create a token, parsing `raw` through the value parser chain.
    ///
    /// ```
    /// use snowcss_core::path::Path;
    /// use snowcss_core::token::Token;
    ///
    /// let token = Token::new(Path::from_dot_path("spacing.inset"), "1px 2px 3px 4px");
    /// assert_eq!(token.values().len(), 4);
    /// ```
    pub fn new(path: Path, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let values = parse_values(&raw);
        Self { path, raw, values }
    }

    /// Full path, including the configured prefix.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The value as written in the token table.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parsed value components.
    pub fn values(&self) -> &[TokenValue] {
        &self.values
    }

    /// Whether the token holds exactly one component.
    pub fn is_single_value(&self) -> bool {
        self.values.len() == 1
    }

    /// Whether the token is a single color.
    pub fn is_color(&self) -> bool {
        matches!(self.values.as_slice(), [TokenValue::Color(_)])
    }

    /// Stable memoization key: `<dot-path>:<hash of raw>`.
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.path.to_dot_path(), hash(&self.raw))
    }
}
