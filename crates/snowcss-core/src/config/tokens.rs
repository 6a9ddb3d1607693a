//! Nested token tables as written by users.

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};

use crate::utils::format_number;

/// A node of the token table: a leaf value or a nested table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
    /// A CSS value, e.g. `"#ff0000"` or `"1px 2px"`.
    Value(String),
    /// A bare number, e.g. a font weight or z-index.
    Number(f64),
    /// A nested scope.
    Table(TokenTable),
}

impl TokenNode {
    /// The leaf value as CSS text, or `None` for a nested table.
    pub fn leaf_value(&self) -> Option<String> {
        match self {
            Self::Value(value) => Some(value.clone()),
            Self::Number(value) => Some(format_number(*value)),
            Self::Table(_) => None,
        }
    }

    /// The nested table, if this is one.
    pub fn as_table(&self) -> Option<&TokenTable> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl From<&str> for TokenNode {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for TokenNode {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<f64> for TokenNode {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for TokenNode {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<TokenTable> for TokenNode {
    fn from(table: TokenTable) -> Self {
        Self::Table(table)
    }
}

/// An ordered, arbitrarily nested mapping of token names to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTable(IndexMap<String, TokenNode>);

impl TokenTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// ```
    /// use snowcss_core::config::TokenTable;
    ///
    /// let tokens = TokenTable::new()
    ///     .with("colors", TokenTable::new().with("primary", "#ff0000"))
    ///     .with("weight", 600);
    /// assert_eq!(tokens.len(), 2);
    /// ```
    pub fn with(mut self, key: impl Into<String>, node: impl Into<TokenNode>) -> Self {
        self.insert(key, node);
        self
    }

    /// Insert or replace an entry. Replacing keeps the entry's position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        node: impl Into<TokenNode>,
    ) -> Option<TokenNode> {
        self.0.insert(key.into(), node.into())
    }

    /// Get an entry by key.
    pub fn get(&self, key: &str) -> Option<&TokenNode> {
        self.0.get(key)
    }

    /// Iterate over entries in declaration order.
    pub fn iter(&self) -> Iter<'_, String, TokenNode> {
        self.0.iter()
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deep-merge `other` into this table. Nested tables merge, anything else
    /// is replaced by the value from `other`.
    pub fn merge(&mut self, other: TokenTable) {
        for (key, node) in other.0 {
            match (self.0.get_mut(&key), node) {
                (Some(TokenNode::Table(existing)), TokenNode::Table(incoming)) => {
                    existing.merge(incoming);
                }
                (_, node) => {
                    self.0.insert(key, node);
                }
            }
        }
    }

    /// Deep-merge a sequence of tables left to right.
    pub fn merge_all(tables: impl IntoIterator<Item = TokenTable>) -> Self {
        tables.into_iter().fold(Self::new(), |mut merged, table| {
            merged.merge(table);
            merged
        })
    }
}

impl<'a> IntoIterator for &'a TokenTable {
    type Item = (&'a String, &'a TokenNode);
    type IntoIter = Iter<'a, String, TokenNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
