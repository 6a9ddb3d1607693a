//! The two reserved token functions and their parsed calls.
//!
//! - `--token("path")` resolves to a custom property reference, `var(--path)`.
//! - `--value("path" [modifier])` inlines the token's value, optionally
//!   transformed by `to px`, `to rem`, `negate` or `/ <percentage>`.

mod parser;

pub(crate) use parser::parse_function;

use std::fmt;

use crate::path::Path;
use crate::syntax::Span;
use crate::token::Token;
use crate::utils::hash;
use crate::values::Modifier;

/// Name of the reference function.
pub const TOKEN_FUNCTION: &str = "--token";

/// Name of the inline-value function.
pub const VALUE_FUNCTION: &str = "--value";

/// Every reserved function name.
pub const FUNCTION_NAMES: [&str; 2] = [TOKEN_FUNCTION, VALUE_FUNCTION];

/// Which reserved function a call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionName {
    /// `--token()`
    Token,
    /// `--value()`
    Value,
}

impl FunctionName {
    /// Match a CSS function name against the reserved names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            TOKEN_FUNCTION => Some(Self::Token),
            VALUE_FUNCTION => Some(Self::Value),
            _ => None,
        }
    }

    /// The CSS function name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Token => TOKEN_FUNCTION,
            Self::Value => VALUE_FUNCTION,
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `--token()` call.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenFunction {
    pub path: Path,
    pub location: Span,
}

impl TokenFunction {
    pub fn new(path: Path, location: Span) -> Self {
        Self { path, location }
    }
}

/// A parsed `--value()` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFunction {
    pub path: Path,
    pub modifier: Option<Modifier>,
    pub location: Span,
}

impl ValueFunction {
    pub fn new(path: Path, modifier: Option<Modifier>, location: Span) -> Self {
        Self {
            path,
            modifier,
            location,
        }
    }
}

/// A reserved function call found in a stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub enum SnowFunction {
    Token(TokenFunction),
    Value(ValueFunction),
}

impl SnowFunction {
    /// Which function was called.
    pub fn name(&self) -> FunctionName {
        match self {
            Self::Token(_) => FunctionName::Token,
            Self::Value(_) => FunctionName::Value,
        }
    }

    /// The referenced token path.
    pub fn path(&self) -> &Path {
        match self {
            Self::Token(function) => &function.path,
            Self::Value(function) => &function.path,
        }
    }

    /// Span of the whole call in the source.
    pub fn location(&self) -> Span {
        match self {
            Self::Token(function) => function.location,
            Self::Value(function) => function.location,
        }
    }

    /// The modifier, for `--value()` calls that have one.
    pub fn modifier(&self) -> Option<&Modifier> {
        match self {
            Self::Token(_) => None,
            Self::Value(function) => function.modifier.as_ref(),
        }
    }

    /// Memoization key of this call resolved against `token`.
    ///
    /// The path is not part of the key, it is already encoded in the token's key.
    pub fn cache_key(&self, token: &Token) -> String {
        match self {
            Self::Token(_) => format!("token:{}", token.cache_key()),
            Self::Value(function) => {
                let modifier = function
                    .modifier
                    .as_ref()
                    .map_or_else(|| "None".to_string(), Modifier::cache_key);
                format!("value:{}:{}", token.cache_key(), hash(&modifier))
            }
        }
    }
}

impl From<TokenFunction> for SnowFunction {
    fn from(function: TokenFunction) -> Self {
        Self::Token(function)
    }
}

impl From<ValueFunction> for SnowFunction {
    fn from(function: ValueFunction) -> Self {
        Self::Value(function)
    }
}
