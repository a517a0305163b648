//! Project setup orchestration

use crate::combos::{Combination, CombinationResolver, Combos};
use crate::error::{Error, Result};
use crate::product::ProductConfig;
use crate::templates::manifest::{self, Manifest, ManifestPatch};
use crate::templates::selector::{select_template, Language};
use crate::templates::{copier, HIDDEN_MANIFEST, MANIFEST, ROOT_DIR};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Options for a single setup run
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Directory the project is created in (defaults to the current directory)
    pub cwd: Option<PathBuf>,

    /// Write into the target even if it already exists
    pub force: bool,

    /// Generate a TypeScript entry point instead of JavaScript
    pub typescript: bool,

    /// Raw environment name, resolved by the [`CombinationResolver`]
    pub env: Option<String>,

    /// Raw format name, resolved by the [`CombinationResolver`]
    pub format: Option<String>,
}

/// What a setup run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupSummary {
    pub target: PathBuf,
    pub combination: Combination,
    pub language: Language,
    /// Entry point, relative to `target`
    pub entry: String,
    /// Build script written into the manifest
    pub build_script: String,
    /// Number of files copied from the template's root tree
    pub files_copied: usize,
    /// Deployment config written into the project root, if any
    pub deploy_config: Option<PathBuf>,
}

impl SetupSummary {
    /// Every file the run wrote: the root tree, the entry point and the
    /// deployment config
    pub fn files_written(&self) -> usize {
        self.files_copied + 1 + usize::from(self.deploy_config.is_some())
    }
}

/// Creates projects from a template directory
pub struct Scaffolder<C: ProductConfig> {
    config: C,
    template_dir: PathBuf,
    resolver: Box<dyn CombinationResolver>,
}

impl<C: ProductConfig> Scaffolder<C> {
    pub fn new(config: C, template_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            template_dir: template_dir.into(),
            resolver: Box::new(Combos),
        }
    }

    /// Replace the default [`Combos`] resolver
    pub fn with_resolver(mut self, resolver: impl CombinationResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Create the project `dir` under `options.cwd`.
    ///
    /// Fails with [`Error::TargetExists`] before touching the filesystem when
    /// the target exists and `force` is off. Later failures leave whatever
    /// was written so far in place.
    pub async fn setup(&self, dir: &str, options: &Options) -> Result<SetupSummary> {
        let cwd = absolute_cwd(options.cwd.as_deref())?;
        let target = cwd.join(dir);

        let exists = fs::try_exists(&target)
            .await
            .map_err(|e| Error::io("inspect", &target, e))?;
        if exists && !options.force {
            return Err(Error::TargetExists {
                path: pretty_path(&target),
            });
        }

        let combination = self
            .resolver
            .resolve(options.env.as_deref(), options.format.as_deref())?;
        let language = Language::from_typescript(options.typescript);
        let selection = select_template(combination, language);

        log::info!(
            "Creating {} project ({}, {}) in {}",
            self.config.display_name(),
            combination,
            language,
            target.display()
        );

        fs::create_dir_all(&target)
            .await
            .map_err(|e| Error::io("create directory", &target, e))?;

        let files_copied = copier::copy_tree(&self.template_dir.join(ROOT_DIR), &target).await?;
        log::debug!("Copied {} template files", files_copied);

        let manifest_path = target.join(MANIFEST);
        let hidden_manifest = target.join(HIDDEN_MANIFEST);
        fs::rename(&hidden_manifest, &manifest_path)
            .await
            .map_err(|e| Error::io("rename", &hidden_manifest, e))?;

        let mut manifest = Manifest::load(&manifest_path).await?;

        let src_dir = target.join("src");
        fs::create_dir_all(&src_dir)
            .await
            .map_err(|e| Error::io("create directory", &src_dir, e))?;

        let input = self.template_dir.join(&selection.input);
        log::debug!("Entry point {} -> {}", selection.input, selection.output);
        fs::copy(&input, target.join(&selection.output))
            .await
            .map_err(|e| Error::io("copy", &input, e))?;

        let patch = ManifestPatch {
            combination,
            build_package: self.config.build_package(),
            build_command: self.config.build_command(),
            output: &selection.output,
            flags: &selection.flags,
        };
        let build_script = patch.build_script();
        let deploy_config = match manifest::patch_manifest(&mut manifest, &patch)? {
            Some(config) => {
                let source = self.template_dir.join(&config);
                let dest = target.join(manifest::DEPLOY_CONFIG_FILE);
                log::debug!("Deploy config {} -> {}", config, dest.display());
                fs::copy(&source, &dest)
                    .await
                    .map_err(|e| Error::io("copy", &source, e))?;
                Some(dest)
            }
            None => None,
        };

        manifest.save().await?;

        Ok(SetupSummary {
            target,
            combination,
            language,
            entry: selection.output,
            build_script,
            files_copied,
            deploy_config,
        })
    }
}

fn absolute_cwd(cwd: Option<&Path>) -> Result<PathBuf> {
    let resolved = match cwd {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        other => {
            let current = std::env::current_dir()
                .map_err(|e| Error::io("resolve current directory", ".", e))?;
            match other {
                Some(path) => current.join(path),
                None => current,
            }
        }
    };
    Ok(normalize_lexically(&resolved))
}

/// Drop `.` and fold `..` without touching the filesystem
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Path from `base` to `target`, both absolute and normalized
fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target: Vec<_> = target.components().collect();
    let base: Vec<_> = base.components().collect();
    let common = target
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// `target` as seen from the process's current directory
fn pretty_path(target: &Path) -> String {
    std::env::current_dir()
        .map(|current| relative_path(target, &normalize_lexically(&current)))
        .unwrap_or_else(|_| target.to_path_buf())
        .display()
        .to_string()
}
