use std::fmt;

use clap::ValueEnum;

/// The named tasks a build can ask for.
///
/// - `All`: the default target; currently runs `Test` only.
/// - `Lint`: run the linter over every file group.
/// - `Test`: run the coverage-wrapped test runner.
/// - `Docs`: refresh the docs copy of the root README.
/// - `Browserify`: stage sources and run the bundler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaskName {
    All,
    Lint,
    Test,
    Docs,
    Browserify,
}

impl TaskName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskName::All => "all",
            TaskName::Lint => "lint",
            TaskName::Test => "test",
            TaskName::Docs => "docs",
            TaskName::Browserify => "browserify",
        }
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_cli_value() {
        for task in TaskName::value_variants() {
            let value = task.to_possible_value().unwrap();
            assert_eq!(value.get_name(), task.to_string());
            assert_eq!(TaskName::from_str(&task.to_string(), false), Ok(*task));
        }
    }

    #[test]
    fn unknown_task_is_rejected() {
        assert!(TaskName::from_str("deploy", false).is_err());
    }
}
