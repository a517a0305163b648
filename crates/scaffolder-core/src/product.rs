//! Product configuration trait for CLI binaries
//!
//! The scaffolding pipeline itself is product-agnostic. Everything it writes
//! that names a concrete tool (the build package, the build command) or that
//! locates the packaged template tree comes from a [`ProductConfig`].

use crate::setup::SetupSummary;
use std::path::{Path, PathBuf};

/// Configuration trait for scaffolding products
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Package added to the generated manifest's devDependencies
    fn build_package(&self) -> &'static str;

    /// Command the generated `build` script runs, without arguments
    fn build_command(&self) -> &'static str;

    /// Template tree packaged alongside the binary
    fn default_template_dir(&self) -> PathBuf;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, summary: &SetupSummary) -> Vec<String>;
}

/// Pick the template directory: explicit override, then the product's
/// environment variable, then the packaged default
pub fn resolve_template_dir<C: ProductConfig>(config: &C, explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    std::env::var_os(config.template_dir_env())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| config.default_template_dir())
}
