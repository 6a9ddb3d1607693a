//! User-facing configuration model.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::TokenTable;

/// Default root font size in pixels.
pub const DEFAULT_ROOT_FONT_SIZE: f64 = 16.0;

/// How hosts inject the generated custom properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InjectType {
    /// Replace an `@snowcss` at-rule in stylesheets.
    AtRule,
    /// Emit a separate stylesheet asset.
    #[default]
    Asset,
    /// Emit an inline `<style>` block.
    Inline,
}

impl InjectType {
    /// The name used in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AtRule => "at-rule",
            Self::Asset => "asset",
            Self::Inline => "inline",
        }
    }
}

impl fmt::Display for InjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token configuration as read from a config file.
///
/// `tokens` may be a single table or a list of tables; a list is deep-merged
/// left to right, so later tables override earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Prefix prepended to every custom property name. Empty means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Injection strategy for hosts.
    #[serde(default)]
    pub inject: InjectType,

    /// Root font size in pixels for px/rem conversion.
    #[serde(default = "default_root_font_size")]
    pub root_font_size: f64,

    /// The design tokens.
    #[serde(deserialize_with = "deserialize_tokens")]
    pub tokens: TokenTable,
}

impl UserConfig {
    /// Create a config with default settings.
    pub fn new(tokens: TokenTable) -> Self {
        Self {
            prefix: None,
            inject: InjectType::default(),
            root_font_size: DEFAULT_ROOT_FONT_SIZE,
            tokens,
        }
    }

    /// Set the prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the injection strategy.
    pub fn with_inject(mut self, inject: InjectType) -> Self {
        self.inject = inject;
        self
    }

    /// Set the root font size.
    pub fn with_root_font_size(mut self, size: f64) -> Self {
        self.root_font_size = size;
        self
    }
}

fn default_root_font_size() -> f64 {
    DEFAULT_ROOT_FONT_SIZE
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TokensInput {
    One(TokenTable),
    Many(Vec<TokenTable>),
}

fn deserialize_tokens<'de, D>(deserializer: D) -> Result<TokenTable, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TokensInput::deserialize(deserializer)? {
        TokensInput::One(table) => table,
        TokensInput::Many(tables) => TokenTable::merge_all(tables),
    })
}
