//! Concurrent recursive directory walk

use crate::error::{Error, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use tokio::fs;
use tokio::task::JoinSet;

/// A file or directory found under the walk root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub absolute: PathBuf,
    /// Path relative to the walk root
    pub relative: PathBuf,
    pub is_dir: bool,
}

type WalkFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// Visit every entry under `root`.
///
/// Entries of one directory are visited concurrently, in no particular
/// order. A directory's own visit finishes before anything inside it is
/// visited. The first failure is returned; siblings still running at that
/// point are aborted, and side effects they already had are kept.
pub async fn walk<F, Fut>(root: &Path, visit: F) -> Result<()>
where
    F: Fn(TemplateEntry) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    walk_dir(root.to_path_buf(), PathBuf::new(), Arc::new(visit)).await
}

fn walk_dir<F, Fut>(dir: PathBuf, prefix: PathBuf, visit: Arc<F>) -> WalkFuture
where
    F: Fn(TemplateEntry) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Box::pin(async move {
        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| Error::io("read directory", &dir, e))?;

        let mut tasks: JoinSet<Result<()>> = JoinSet::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::io("read directory", &dir, e))?
        {
            let absolute = entry.path();
            let relative = prefix.join(entry.file_name());
            let is_dir = entry
                .file_type()
                .await
                .map_err(|e| Error::io("inspect", &absolute, e))?
                .is_dir();
            let visit = Arc::clone(&visit);

            tasks.spawn(async move {
                visit(TemplateEntry {
                    absolute: absolute.clone(),
                    relative: relative.clone(),
                    is_dir,
                })
                .await?;
                if is_dir {
                    walk_dir(absolute, relative, visit).await?;
                }
                Ok(())
            });
        }

        // Returning early drops the set, which aborts the remaining siblings
        while let Some(joined) = tasks.join_next().await {
            joined??;
        }
        Ok(())
    })
}
