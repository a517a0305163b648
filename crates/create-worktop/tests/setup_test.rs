use clap::Parser;
use create_worktop::{run, Args};
use scaffolder_core::Error;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn args(cwd: &Path, extra: &[&str]) -> Args {
    let cwd = cwd.to_string_lossy().into_owned();
    let mut argv = vec!["create-worktop", "--cwd", cwd.as_str()];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}

fn manifest(target: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(target.join("package.json")).unwrap()).unwrap()
}

#[tokio::test]
async fn test_default_worker_typescript_project() {
    let cwd = TempDir::new().unwrap();
    let summary = run(&args(
        cwd.path(),
        &["--env", "cfw", "--format", "modulesWorker", "--typescript", "myapp"],
    ))
    .await
    .unwrap();

    let target = cwd.path().join("myapp");
    assert_eq!(summary.target, target);
    assert_eq!(summary.files_written(), count_files(&target));

    let template = std::fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("template/src/cfw.esm.ts"),
    )
    .unwrap();
    assert_eq!(
        std::fs::read_to_string(target.join("src/index.ts")).unwrap(),
        template
    );

    let pkg = manifest(&target);
    assert_eq!(pkg["scripts"]["build"], "worktop build src/index.ts");
    assert_eq!(pkg["devDependencies"]["worktop.build"], "latest");
    assert!(pkg.get("main").is_none());
    assert!(target.join("wrangler.toml").is_file());
    assert!(target.join(".gitignore").is_file());
    assert!(target.join(".editorconfig").is_file());
    assert!(!target.join(".package.json").exists());
}

#[tokio::test]
async fn test_service_worker_project_keeps_main() {
    let cwd = TempDir::new().unwrap();
    run(&args(cwd.path(), &["--format", "sw", "worker"]))
        .await
        .unwrap();

    let target = cwd.path().join("worker");
    let pkg = manifest(&target);
    assert_eq!(pkg["main"], "build/index.js");
    assert_eq!(pkg["scripts"]["build"], "worktop build src/index.js --format sw");
    assert!(std::fs::read_to_string(target.join("wrangler.toml"))
        .unwrap()
        .contains("service-worker"));
}

#[tokio::test]
async fn test_node_project_has_no_wrangler_config() {
    let cwd = TempDir::new().unwrap();
    let summary = run(&args(cwd.path(), &["--env", "node", "--format", "cjs", "server"]))
        .await
        .unwrap();

    let target = cwd.path().join("server");
    assert_eq!(summary.deploy_config, None);
    assert_eq!(summary.files_written(), count_files(&target));
    assert!(!target.join("wrangler.toml").exists());
    assert!(target.join("src/index.js").is_file());
    assert_eq!(
        manifest(&target)["scripts"]["build"],
        "worktop build src/index.js --env node --format cjs"
    );
}

#[tokio::test]
async fn test_existing_directory_requires_force() {
    let cwd = TempDir::new().unwrap();
    std::fs::create_dir(cwd.path().join("taken")).unwrap();

    let err = run(&args(cwd.path(), &["taken"])).await.unwrap_err();
    assert!(matches!(err, Error::TargetExists { .. }));
    assert_eq!(std::fs::read_dir(cwd.path().join("taken")).unwrap().count(), 0);

    run(&args(cwd.path(), &["--force", "taken"])).await.unwrap();
    assert!(cwd.path().join("taken/package.json").is_file());
}

#[tokio::test]
async fn test_rerun_with_force_gives_same_build_script() {
    let cwd = TempDir::new().unwrap();
    let extra = ["--env", "deno", "--force", "again"];

    run(&args(cwd.path(), &extra)).await.unwrap();
    let first = manifest(&cwd.path().join("again"));
    run(&args(cwd.path(), &extra)).await.unwrap();
    let second = manifest(&cwd.path().join("again"));

    assert_eq!(first["scripts"]["build"], "worktop build src/index.js --env deno");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_invalid_combination_is_reported() {
    let cwd = TempDir::new().unwrap();
    let err = run(&args(cwd.path(), &["--env", "deno", "--format", "sw", "nope"]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Combination(_)));
    assert!(!cwd.path().join("nope").exists());
}

#[tokio::test]
async fn test_missing_template_dir_fails() {
    let cwd = TempDir::new().unwrap();
    let missing = cwd.path().join("no-templates");
    let missing = missing.to_string_lossy().into_owned();

    let err = run(&args(cwd.path(), &["--template-dir", missing.as_str(), "app"]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
