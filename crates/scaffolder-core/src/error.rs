//! Error types for scaffolding operations

use crate::combos::ComboError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can stop a scaffold run.
///
/// Nothing is retried or rolled back: the first error aborts the run and
/// whatever was already written stays on disk.
#[derive(Error, Debug)]
pub enum Error {
    /// Target directory is already present and `force` was not given
    #[error(
        "Refusing to overwrite existing \"{path}\" directory.\n\
         Please specify a different directory or use the `--force` flag."
    )]
    TargetExists { path: String },

    /// The environment/format pair was rejected by the resolver
    #[error(transparent)]
    Combination(#[from] ComboError),

    /// Any filesystem failure while walking, copying, renaming, reading or writing
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The copied manifest is not valid JSON
    #[error("Failed to parse manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest parsed, but a field that gets patched is not an object
    #[error("Manifest {} has a non-object `{field}` field", .path.display())]
    ManifestShape { path: PathBuf, field: &'static str },

    /// A concurrent copy task panicked or was cancelled
    #[error("Template copy task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
