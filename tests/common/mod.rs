#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use taskmake::config::ConfigFile;
use taskmake::exec::ToolInvocation;
use taskmake::fs::mock::MockFileSystem;
use taskmake::tasks::TaskRunner;
use taskmake_test_utils::fake_runner::FakeToolRunner;

pub use taskmake_test_utils::builders::ConfigFileBuilder;
pub use taskmake_test_utils::init_tracing;

/// Exit codes for a run where every tool succeeds.
pub const NO_FAILURES: [i32; 0] = [];

pub type Invoked = Arc<Mutex<Vec<ToolInvocation>>>;

/// A mock project with everything the stock tasks read.
pub fn stock_project() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file("README.md", "# espree\n");
    fs.add_file("docs/README.md", "# stale\n");
    fs.add_file("espree.js", "module.exports = require('./lib/espree');\n");
    fs.add_file("package.json", "{\"name\":\"espree\"}\n");
    fs.add_file("lib/espree.js", "// parser\n");
    fs.add_file("lib/features.js", "// features\n");
    fs.add_file("lib/util/helpers.js", "// helpers\n");
    fs
}

/// A task runner over `fs` whose tools answer with `codes` (then 0).
pub fn runner_with_codes(
    config: ConfigFile,
    fs: &MockFileSystem,
    codes: impl IntoIterator<Item = i32>,
) -> (TaskRunner<FakeToolRunner>, Invoked) {
    let invoked: Invoked = Arc::new(Mutex::new(Vec::new()));
    let runner = FakeToolRunner::new(Arc::clone(&invoked)).with_exit_codes(codes);
    (
        TaskRunner::new(config, Arc::new(fs.clone()), runner),
        invoked,
    )
}

pub fn invoked_args(invoked: &Invoked) -> Vec<Vec<String>> {
    invoked
        .lock()
        .unwrap()
        .iter()
        .map(|inv| inv.args.clone())
        .collect()
}
