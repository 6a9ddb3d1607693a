//! Design-token compiler core for Snow CSS.
//!
//! This crate recognizes the two reserved CSS functions, resolves them against a
//! nested token table and rewrites or emits CSS:
//!
//! - **Paths**: dot-delimited token identifiers with decimal-aware segmentation
//! - **Values**: typed decomposition of token values with modifier support
//! - **Extraction**: positioned `--token()` / `--value()` calls from stylesheet text
//! - **Resolution**: calls matched against the token index, with diagnostics
//! - **Emission**: `:root {}` custom-property blocks, pretty or minified
//!
//! # Example
//!
//! ```
//! use snowcss_core::prelude::*;
//!
//! let tokens = TokenTable::new().with("colors", TokenTable::new().with("primary", "#ff0000"));
//! let config = Config::new(UserConfig::new(tokens))?;
//!
//! let css = ".a { color: --value(\"colors.primary\"); }";
//! let (calls, mut diagnostics) = extract(css);
//! let (resolved, resolve_diagnostics) = resolve(&config, &calls);
//! diagnostics.merge(resolve_diagnostics);
//!
//! assert!(!diagnostics.has_errors());
//! assert_eq!(replace(css, &resolved), ".a { color: #ff0000; }");
//! # Ok::<(), snowcss_core::Error>(())
//! ```

pub mod config;
pub mod diagnostics;
pub mod emitter;
pub mod extract;
pub mod functions;
pub mod path;
pub mod resolver;
pub mod rewrite;
pub mod syntax;
pub mod token;
pub mod utils;
pub mod values;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::config::{Config, InjectType, TokenNode, TokenTable, UserConfig};
    pub use crate::diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics, WithDiagnostics};
    pub use crate::emitter::{EmitOptions, emit};
    pub use crate::extract::{SnowAtRule, extract, extract_at_rules};
    pub use crate::functions::{FunctionName, SnowFunction, TokenFunction, ValueFunction};
    pub use crate::path::Path;
    pub use crate::resolver::{ResolvedToken, resolve, resolve_all};
    pub use crate::rewrite::{replace, replace_at_rule};
    pub use crate::syntax::{CssSyntax, Node, NodeKind, Span, SyntaxProvider};
    pub use crate::token::Token;
    pub use crate::values::{Modifier, ModifyContext, TokenValue, Unit};
}
