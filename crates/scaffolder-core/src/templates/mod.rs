//! Template tree walking, copying, entry-point selection and manifest patching
//!
//! A template directory has a fixed layout:
//!
//! - `root/`: generic scaffold, copied as-is except for `_`-prefixed names
//!   which become dot-files (the manifest ships as `_package.json`)
//! - `src/<env>.<format>.<ext>`: one entry point per supported combination
//!   and language
//! - `config/wrangler.<format>.toml`: deployment config for Cloudflare Workers

pub mod copier;
pub mod manifest;
pub mod selector;
pub mod walker;

pub use copier::{copy_tree, normalize_hidden_name};
pub use manifest::{patch_manifest, Manifest, ManifestPatch};
pub use selector::{derive_flags, select_template, Language, Selection};
pub use walker::{walk, TemplateEntry};

/// Subdirectory of the template copied into every project
pub const ROOT_DIR: &str = "root";

/// Manifest name after copying, before it is renamed into place
pub const HIDDEN_MANIFEST: &str = ".package.json";

pub const MANIFEST: &str = "package.json";
