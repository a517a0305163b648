//! Scaffolder Core - project scaffolding from a packaged template tree
//!
//! Materializes a starter project for a chosen runtime environment, module
//! format and language: the template's `root/` tree is copied concurrently,
//! escaped dot-files are renamed, the matching entry point is dropped into
//! `src/`, and the copied `package.json` is patched with the build tooling.
//!
//! # Architecture
//!
//! - **Core operations** - [`templates`]: walker, copier, selector, manifest patcher
//! - **Combination resolving** - [`combos`]: raw `--env`/`--format` to a supported pair
//! - **Orchestration** - [`Scaffolder`] driven by a [`ProductConfig`]
//!
//! # Example Usage
//!
//! ```ignore
//! use scaffolder_core::{Options, Scaffolder};
//!
//! let scaffolder = Scaffolder::new(MyConfig, template_dir);
//! let summary = scaffolder
//!     .setup("my-app", &Options { typescript: true, ..Default::default() })
//!     .await?;
//! ```

pub mod combos;
pub mod error;
pub mod product;
pub mod setup;
pub mod templates;

// Re-export main types for convenience
pub use combos::{Combination, CombinationResolver, Combos, Environment, Format};
pub use error::{Error, Result};
pub use product::{resolve_template_dir, ProductConfig};
pub use setup::{Options, Scaffolder, SetupSummary};
pub use templates::Language;
