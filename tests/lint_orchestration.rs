// tests/lint_orchestration.rs

mod common;
use crate::common::{
    init_tracing, invoked_args, runner_with_codes, stock_project, ConfigFileBuilder, NO_FAILURES,
};

use std::error::Error;
use std::sync::{Arc, Mutex};

use taskmake::tasks::{TaskOutcome, TaskRunner};
use taskmake::types::TaskName;
use taskmake_test_utils::fake_runner::{FakeResponse, FakeToolRunner};
use taskmake_test_utils::SharedOutput;

type TestResult = Result<(), Box<dyn Error>>;

fn flags(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn all_groups_pass_means_success() -> TestResult {
    init_tracing();
    let fs = stock_project();
    let (mut tasks, invoked) = runner_with_codes(ConfigFileBuilder::new().build(), &fs, NO_FAILURES);

    let outcome = tasks.run(TaskName::Lint, &[]).await?;

    assert_eq!(outcome, TaskOutcome::Success);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(invoked.lock().unwrap().len(), 4);
    Ok(())
}

#[tokio::test]
async fn groups_run_in_fixed_order_with_extra_flags_last() -> TestResult {
    init_tracing();
    let fs = stock_project();
    let (mut tasks, invoked) = runner_with_codes(ConfigFileBuilder::new().build(), &fs, NO_FAILURES);

    tasks.run(TaskName::Lint, &flags(&["--fix", "--quiet"])).await?;

    let calls = invoked.lock().unwrap().clone();
    assert!(calls.iter().all(|c| c.program == "eslint"));
    assert_eq!(
        invoked_args(&invoked),
        vec![
            flags(&["Makefile.js", "--fix", "--quiet"]),
            flags(&[".eslintrc.js", "--fix", "--quiet"]),
            flags(&["lib/**/*.js", "espree.js", "--fix", "--quiet"]),
            flags(&["tests/lib/**/*.js", "--fix", "--quiet"]),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn failures_do_not_short_circuit_later_groups() -> TestResult {
    init_tracing();
    let fs = stock_project();
    // G1 pass, G2 fail, G3 pass, G4 fail.
    let (mut tasks, invoked) =
        runner_with_codes(ConfigFileBuilder::new().build(), &fs, [0, 1, 0, 2]);

    let outcome = tasks.run(TaskName::Lint, &[]).await?;

    assert_eq!(outcome, TaskOutcome::Failed { failures: 2 });
    assert_eq!(outcome.exit_code(), 1);

    let args = invoked_args(&invoked);
    assert_eq!(args.len(), 4);
    assert_eq!(args[2][0], "lib/**/*.js");
    assert_eq!(args[3][0], "tests/lib/**/*.js");
    Ok(())
}

#[tokio::test]
async fn first_group_failure_still_runs_the_rest() -> TestResult {
    let fs = stock_project();
    let (mut tasks, invoked) = runner_with_codes(ConfigFileBuilder::new().build(), &fs, [1]);

    let outcome = tasks.run(TaskName::Lint, &[]).await?;

    assert_eq!(outcome, TaskOutcome::Failed { failures: 1 });
    assert_eq!(invoked.lock().unwrap().len(), 4);
    Ok(())
}

#[tokio::test]
async fn unspawnable_linter_counts_as_failure_per_group() -> TestResult {
    let invoked = Arc::new(Mutex::new(Vec::new()));
    let runner = FakeToolRunner::new(Arc::clone(&invoked)).with_responses([
        FakeResponse::SpawnError,
        FakeResponse::Exit(0),
        FakeResponse::SpawnError,
        FakeResponse::Exit(0),
    ]);
    let fs = stock_project();
    let mut tasks = TaskRunner::new(ConfigFileBuilder::new().build(), Arc::new(fs), runner);

    let outcome = tasks.run(TaskName::Lint, &[]).await?;

    assert_eq!(outcome, TaskOutcome::Failed { failures: 2 });
    assert_eq!(invoked.lock().unwrap().len(), 4);
    Ok(())
}

#[tokio::test]
async fn repeated_runs_start_from_a_fresh_counter() -> TestResult {
    let fs = stock_project();
    let (mut tasks, _invoked) =
        runner_with_codes(ConfigFileBuilder::new().build(), &fs, [1, 1, 1, 1]);

    let first = tasks.run(TaskName::Lint, &[]).await?;
    let second = tasks.run(TaskName::Lint, &[]).await?;

    assert_eq!(first, TaskOutcome::Failed { failures: 4 });
    assert_eq!(second, TaskOutcome::Success);
    Ok(())
}

#[tokio::test]
async fn custom_linter_and_groups_are_honoured() -> TestResult {
    let fs = stock_project();
    let cfg = ConfigFileBuilder::new()
        .linter("standard")
        .tests_group(&["test/**/*.js", "bench/*.js"])
        .build();
    let (mut tasks, invoked) = runner_with_codes(cfg, &fs, NO_FAILURES);

    tasks.lint(&[]).await;

    let calls = invoked.lock().unwrap().clone();
    assert_eq!(calls[3].program, "standard");
    assert_eq!(calls[3].args, flags(&["test/**/*.js", "bench/*.js"]));
    Ok(())
}

#[tokio::test]
async fn each_progress_line_precedes_its_group_invocation() -> TestResult {
    let output = SharedOutput::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let hook_output = output.clone();
    let hook_seen = Arc::clone(&seen);
    let runner = FakeToolRunner::new(Arc::new(Mutex::new(Vec::new())))
        .with_exit_codes([0, 1, 0, 0])
        .on_invoke(move |inv| {
            let last_line = hook_output.lines().last().cloned().unwrap_or_default();
            hook_seen
                .lock()
                .unwrap()
                .push((last_line, inv.args[0].clone()));
        });
    let mut tasks = TaskRunner::new(ConfigFileBuilder::new().build(), Arc::new(stock_project()), runner)
        .with_progress_writer(output.clone());

    tasks.run(TaskName::Lint, &[]).await?;

    let pairs: Vec<(String, String)> = seen.lock().unwrap().clone();
    let expected = [
        ("Validating Makefile.js", "Makefile.js"),
        ("Validating configuration files", ".eslintrc.js"),
        ("Validating JavaScript files", "lib/**/*.js"),
        ("Validating JavaScript test files", "tests/lib/**/*.js"),
    ];
    assert_eq!(pairs.len(), expected.len());
    for ((line, first_arg), (want_line, want_arg)) in pairs.iter().zip(expected) {
        assert_eq!(line, want_line);
        assert_eq!(first_arg, want_arg);
    }
    assert_eq!(output.lines().len(), 4);
    Ok(())
}
