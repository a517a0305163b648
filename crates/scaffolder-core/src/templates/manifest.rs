//! Generated project manifest (package.json) loading and patching

use crate::combos::{Combination, Environment, Format};
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Version marker written for the build tool dependency
pub const BUILD_PACKAGE_VERSION: &str = "latest";

/// Directory inside the template tree holding deployment configs
pub const CONFIG_DIR: &str = "config";

/// Name the deployment config gets in the generated project
pub const DEPLOY_CONFIG_FILE: &str = "wrangler.toml";

/// A package.json kept in memory between loading and saving, key order intact
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl Manifest {
    /// Read and parse the manifest at `path`. Always reads from disk.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| Error::io("read", path, e))?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|source| Error::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;
        match value {
            Value::Object(fields) => Ok(Self {
                path: path.to_path_buf(),
                fields,
            }),
            _ => Err(Error::ManifestShape {
                path: path.to_path_buf(),
                field: "<root>",
            }),
        }
    }

    /// Write back to where it was loaded from, 2-space indented
    pub async fn save(&self) -> Result<()> {
        fs::write(&self.path, self.to_pretty_string())
            .await
            .map_err(|e| Error::io("write", &self.path, e))
    }

    pub fn to_pretty_string(&self) -> String {
        // A map of JSON values always serializes
        let mut out = serde_json::to_string_pretty(&self.fields).unwrap_or_default();
        out.push('\n');
        out
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Look up `key` inside the object stored under `section`
    pub fn get_in(&self, section: &str, key: &str) -> Option<&Value> {
        self.fields.get(section)?.as_object()?.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// The object stored under `section`, created empty when missing
    fn section_mut(&mut self, section: &'static str) -> Result<&mut Map<String, Value>> {
        let path = &self.path;
        self.fields
            .entry(section)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| Error::ManifestShape {
                path: path.clone(),
                field: section,
            })
    }
}

/// What to write into the manifest
#[derive(Debug, Clone)]
pub struct ManifestPatch<'a> {
    pub combination: Combination,
    /// Package added to devDependencies
    pub build_package: &'a str,
    /// Command the `build` script runs
    pub build_command: &'a str,
    /// Entry point path inside the project
    pub output: &'a str,
    pub flags: &'a str,
}

impl ManifestPatch<'_> {
    pub fn build_script(&self) -> String {
        let mut script = format!("{} {}", self.build_command, self.output);
        if !self.flags.is_empty() {
            script.push(' ');
            script.push_str(self.flags);
        }
        script
    }
}

/// Apply `patch` to `manifest`.
///
/// Returns the template-relative path of a deployment config that should be
/// copied to [`DEPLOY_CONFIG_FILE`] in the project root, if the environment
/// needs one. Patching twice with the same input gives the same manifest.
pub fn patch_manifest(manifest: &mut Manifest, patch: &ManifestPatch<'_>) -> Result<Option<String>> {
    manifest.section_mut("devDependencies")?.insert(
        patch.build_package.to_string(),
        Value::String(BUILD_PACKAGE_VERSION.to_string()),
    );

    manifest
        .section_mut("scripts")?
        .insert("build".to_string(), Value::String(patch.build_script()));

    let env = patch.combination.env();
    let format = patch.combination.format();

    let deploy_config = (env == Environment::Cfw)
        .then(|| format!("{}/wrangler.{}.toml", CONFIG_DIR, format));

    // Only the service worker upload reads `main`
    if !(env == Environment::Cfw && format == Format::Sw) {
        manifest.remove("main");
    }

    Ok(deploy_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PACKAGE: &str = r#"{
  "private": true,
  "name": "worktop-app",
  "main": "build/index.js",
  "scripts": {
    "deploy": "wrangler publish"
  },
  "dependencies": {
    "worktop": "next"
  },
  "devDependencies": {}
}"#;

    fn manifest() -> Manifest {
        Manifest::parse(Path::new("package.json"), PACKAGE).unwrap()
    }

    fn patch(env: Environment, format: Format, flags: &str) -> ManifestPatch<'_> {
        ManifestPatch {
            combination: Combination::new(env, format).unwrap(),
            build_package: "worktop.build",
            build_command: "worktop build",
            output: "src/index.ts",
            flags,
        }
    }

    #[test]
    fn test_adds_build_dependency_and_script() {
        let mut m = manifest();
        patch_manifest(&mut m, &patch(Environment::Cfw, Format::Esm, "")).unwrap();

        assert_eq!(m.get_in("devDependencies", "worktop.build").unwrap(), "latest");
        assert_eq!(
            m.get_in("scripts", "build").unwrap(),
            "worktop build src/index.ts"
        );
        assert_eq!(
            m.get_in("scripts", "deploy").unwrap(),
            "wrangler publish"
        );
    }

    #[test]
    fn test_build_script_appends_flags() {
        let mut m = manifest();
        patch_manifest(&mut m, &patch(Environment::Node, Format::Cjs, "--env node --format cjs"))
            .unwrap();

        assert_eq!(
            m.get_in("scripts", "build").unwrap(),
            "worktop build src/index.ts --env node --format cjs"
        );
    }

    #[test]
    fn test_repatching_does_not_accumulate_flags() {
        let mut m = manifest();
        let p = patch(Environment::Deno, Format::Esm, "--env deno");
        patch_manifest(&mut m, &p).unwrap();
        let first = m.to_pretty_string();
        patch_manifest(&mut m, &p).unwrap();

        assert_eq!(
            m.get_in("scripts", "build").unwrap(),
            "worktop build src/index.ts --env deno"
        );
        assert_eq!(m.to_pretty_string(), first);
    }

    #[test]
    fn test_main_kept_only_for_cfw_service_worker() {
        for combo in Combination::all() {
            let mut m = manifest();
            patch_manifest(
                &mut m,
                &patch(combo.env(), combo.format(), ""),
            )
            .unwrap();

            let keeps_main = combo.env() == Environment::Cfw && combo.format() == Format::Sw;
            assert_eq!(m.get("main").is_some(), keeps_main, "{}", combo);
        }
    }

    #[test]
    fn test_deploy_config_only_for_cfw() {
        let mut m = manifest();
        let config = patch_manifest(&mut m, &patch(Environment::Cfw, Format::Sw, "--format sw"))
            .unwrap();
        assert_eq!(config.as_deref(), Some("config/wrangler.sw.toml"));

        let mut m = manifest();
        let config = patch_manifest(&mut m, &patch(Environment::Node, Format::Esm, "--env node"))
            .unwrap();
        assert_eq!(config, None);
    }

    #[test]
    fn test_missing_sections_are_created() {
        let mut m = Manifest::parse(Path::new("package.json"), r#"{"name": "bare"}"#).unwrap();
        patch_manifest(&mut m, &patch(Environment::Cfw, Format::Esm, "")).unwrap();

        assert_eq!(m.get_in("devDependencies", "worktop.build").unwrap(), "latest");
        assert!(m.get_in("scripts", "build").is_some());
    }

    #[test]
    fn test_non_object_section_is_rejected() {
        let mut m =
            Manifest::parse(Path::new("package.json"), r#"{"scripts": "nope"}"#).unwrap();
        let err = patch_manifest(&mut m, &patch(Environment::Cfw, Format::Esm, "")).unwrap_err();
        assert!(matches!(err, Error::ManifestShape { field: "scripts", .. }));
    }

    #[test]
    fn test_parse_failures() {
        let err = Manifest::parse(Path::new("package.json"), "{ not json").unwrap_err();
        assert!(matches!(err, Error::ManifestParse { .. }));

        let err = Manifest::parse(Path::new("package.json"), "[1, 2]").unwrap_err();
        assert!(matches!(err, Error::ManifestShape { field: "<root>", .. }));
    }

    #[test]
    fn test_key_order_preserved() {
        let mut m = manifest();
        patch_manifest(&mut m, &patch(Environment::Cfw, Format::Esm, "")).unwrap();

        let out = m.to_pretty_string();
        let name = out.find("\"name\"").unwrap();
        let scripts = out.find("\"scripts\"").unwrap();
        let deps = out.find("\"dependencies\"").unwrap();
        assert!(name < scripts && scripts < deps);
        assert!(out.starts_with("{\n  \"private\": true,"));
        assert!(out.ends_with("}\n"));
    }

    #[tokio::test]
    async fn test_load_and_save_round_trip_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, PACKAGE).unwrap();

        let mut m = Manifest::load(&path).await.unwrap();
        patch_manifest(&mut m, &patch(Environment::Cfw, Format::Esm, "")).unwrap();
        m.save().await.unwrap();

        let reloaded = Manifest::load(&path).await.unwrap();
        assert_eq!(
            reloaded.get_in("scripts", "build").unwrap(),
            "worktop build src/index.ts"
        );
        assert!(reloaded.get("main").is_none());
    }
}
