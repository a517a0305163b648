//! Template tree copying with hidden-file renaming

use super::walker::{walk, TemplateEntry};
use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::fs;

/// Prefix standing in for a leading dot in template file names
pub const HIDDEN_PREFIX: char = '_';

/// Turn the escaped dot-file name back into the real one.
///
/// Only the first component starting with [`HIDDEN_PREFIX`] changes:
/// `foo/_gitignore` becomes `foo/.gitignore`, `foo/bar` and `foo_bar/baz`
/// are returned as-is.
pub fn normalize_hidden_name(path: &Path) -> PathBuf {
    let mut renamed = false;
    path.components()
        .map(|component| match component {
            Component::Normal(name) if !renamed => match name.to_str() {
                Some(s) if s.starts_with(HIDDEN_PREFIX) => {
                    renamed = true;
                    PathBuf::from(format!(".{}", &s[HIDDEN_PREFIX.len_utf8()..]))
                }
                _ => PathBuf::from(name),
            },
            other => PathBuf::from(other.as_os_str()),
        })
        .collect()
}

/// Copy every entry under `source` into `target`.
///
/// Directories are created verbatim, files are copied under their
/// normalized names. Returns how many files were copied.
pub async fn copy_tree(source: &Path, target: &Path) -> Result<usize> {
    let copied = Arc::new(AtomicUsize::new(0));
    let target = target.to_path_buf();

    let counter = Arc::clone(&copied);
    walk(source, move |entry: TemplateEntry| {
        let target = target.clone();
        let counter = Arc::clone(&counter);
        async move {
            if entry.is_dir {
                let dest = target.join(&entry.relative);
                log::debug!("mkdir {}", dest.display());
                fs::create_dir_all(&dest)
                    .await
                    .map_err(|e| Error::io("create directory", &dest, e))?;
            } else {
                let dest = target.join(normalize_hidden_name(&entry.relative));
                log::debug!("copy {} -> {}", entry.absolute.display(), dest.display());
                fs::copy(&entry.absolute, &dest)
                    .await
                    .map_err(|e| Error::io("copy", &entry.absolute, e))?;
                counter.fetch_add(1, Ordering::Relaxed);
            }
            Ok(())
        }
    })
    .await?;

    Ok(copied.load(Ordering::Relaxed))
}
