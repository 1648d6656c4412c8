use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use taskmake::errors::{Result, TaskmakeError};
use taskmake::exec::{ToolInvocation, ToolRunner};

/// What the fake runner answers for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeResponse {
    Exit(i32),
    /// Behave like a tool that could not be spawned.
    SpawnError,
}

type Hook = Box<dyn FnMut(&ToolInvocation) + Send>;

/// A fake tool runner that:
/// - records every invocation, in order
/// - answers with scripted responses, then exit code 0 once the script runs out
/// - optionally calls a hook at invocation time (e.g. to inspect staged files)
pub struct FakeToolRunner {
    invoked: Arc<Mutex<Vec<ToolInvocation>>>,
    responses: VecDeque<FakeResponse>,
    hook: Option<Hook>,
}

impl FakeToolRunner {
    pub fn new(invoked: Arc<Mutex<Vec<ToolInvocation>>>) -> Self {
        Self {
            invoked,
            responses: VecDeque::new(),
            hook: None,
        }
    }

    pub fn with_exit_codes(mut self, codes: impl IntoIterator<Item = i32>) -> Self {
        self.responses
            .extend(codes.into_iter().map(FakeResponse::Exit));
        self
    }

    pub fn with_responses(mut self, responses: impl IntoIterator<Item = FakeResponse>) -> Self {
        self.responses.extend(responses);
        self
    }

    pub fn on_invoke(mut self, hook: impl FnMut(&ToolInvocation) + Send + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }
}

impl ToolRunner for FakeToolRunner {
    fn invoke(
        &mut self,
        invocation: ToolInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + '_>> {
        if let Some(hook) = self.hook.as_mut() {
            hook(&invocation);
        }
        let response = self.responses.pop_front().unwrap_or(FakeResponse::Exit(0));
        self.invoked.lock().unwrap().push(invocation.clone());

        Box::pin(async move {
            match response {
                FakeResponse::Exit(code) => Ok(code),
                FakeResponse::SpawnError => Err(TaskmakeError::Other(anyhow::anyhow!(
                    "failed to spawn '{}'",
                    invocation.program
                ))),
            }
        })
    }
}
