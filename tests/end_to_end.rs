// tests/end_to_end.rs

//! Drives the real entry point with shell-script stand-ins for the tools.

#![cfg(unix)]

use std::error::Error;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use clap::Parser;
use taskmake::cli::CliArgs;
use taskmake::run;

type TestResult = Result<(), Box<dyn Error>>;

fn write_tool(project: &Path, name: &str, body: &str) -> TestResult {
    let bin = project.join("node_modules/.bin");
    std::fs::create_dir_all(&bin)?;
    let path = bin.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

fn args_for(project: &Path, task: &str, extra: &[&str]) -> CliArgs {
    let config = project.join("Taskmake.toml");
    let mut argv = vec![
        "taskmake".to_string(),
        "--config".to_string(),
        config.to_string_lossy().into_owned(),
        task.to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    CliArgs::parse_from(argv)
}

#[tokio::test]
async fn lint_runs_local_linter_for_every_group() -> TestResult {
    let project = tempfile::tempdir()?;
    // Log each call, fail on the config group only.
    write_tool(
        project.path(),
        "eslint",
        r#"echo "$@" >> calls.log
case "$1" in .eslintrc.js) exit 1 ;; esac
exit 0"#,
    )?;

    let outcome = run(args_for(project.path(), "lint", &["--fix"])).await?;

    assert_eq!(outcome.exit_code(), 1);
    let log = std::fs::read_to_string(project.path().join("calls.log"))?;
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Makefile.js --fix",
            ".eslintrc.js --fix",
            "lib/**/*.js espree.js --fix",
            "tests/lib/**/*.js --fix",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn browserify_bundles_and_removes_scratch_tree() -> TestResult {
    let project = tempfile::tempdir()?;
    let root = project.path();
    std::fs::create_dir_all(root.join("lib/util"))?;
    std::fs::write(root.join("lib/util/a.js"), "a")?;
    std::fs::write(root.join("espree.js"), "entry")?;
    std::fs::write(root.join("package.json"), "{}")?;
    // Copy the staged entry to the output path, then fail anyway.
    write_tool(root, "browserify", r#"cp "$1" "$3"; test -f ./tmp/lib/util/a.js || exit 9; exit 4"#)?;

    let outcome = run(args_for(root, "browserify", &[])).await?;

    assert!(outcome.is_success());
    assert!(!root.join("tmp").exists());
    assert_eq!(std::fs::read_to_string(root.join("build/espree.js"))?, "entry");
    Ok(())
}

#[tokio::test]
async fn dry_run_touches_nothing() -> TestResult {
    let project = tempfile::tempdir()?;
    let root = project.path();

    let config = root.join("Taskmake.toml");
    let args = CliArgs::parse_from([
        "taskmake".to_string(),
        "--dry-run".to_string(),
        "--config".to_string(),
        config.to_string_lossy().into_owned(),
        "browserify".to_string(),
    ]);
    let outcome = run(args).await?;

    assert!(outcome.is_success());
    assert!(!root.join("tmp").exists());
    assert!(!root.join("build").exists());
    Ok(())
}
