//! Snow CSS: design tokens compiled into plain CSS.
//!
//! This crate re-exports the compiler from `snowcss-core` and adds what a
//! build or editor integration needs around it:
//!
//! - **Discovery**: find the nearest `snow.config.toml` / `snow.config.json`
//! - **Loading**: read and validate configs from disk
//! - **Store**: a process-wide cache of loaded configs with explicit invalidation
//! - **Context**: extract, resolve, rewrite and emit against one config
//! - **Hot Reload**: invalidate configs when their files change
//!
//! # Example
//!
//! ```no_run
//! use snowcss::prelude::*;
//!
//! # fn main() -> snowcss::Result<()> {
//! let mut context = Context::load(&LoadConfigOptions::root("."))?;
//!
//! let (code, diagnostics) = context.transform(".a { color: --token(\"colors.primary\"); }");
//! for diagnostic in &diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//!
//! if let Some(code) = code {
//!     println!("{code}");
//! }
//! println!("{}", context.emit_css(EmitOptions::minified()).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub use snowcss_core::{
    config, diagnostics, emitter, extract, functions, path, resolver, rewrite, syntax, token,
    utils, values,
};

pub mod context;
pub mod loader;
pub mod store;

#[cfg(feature = "hot-reload")]
pub mod hot_reload;

mod error;

pub use context::Context;
pub use error::{Error, Result};
pub use loader::{CONFIG_FILES, ConfigFormat, LoadConfigOptions, find_nearest_config, load_config};
pub use store::ConfigStore;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use snowcss_core::prelude::*;

    pub use crate::context::Context;
    pub use crate::loader::{LoadConfigOptions, find_nearest_config, load_config};
    pub use crate::store::ConfigStore;

    #[cfg(feature = "hot-reload")]
    pub use crate::hot_reload::ConfigWatcher;
}
