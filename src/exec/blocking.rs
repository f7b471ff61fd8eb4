// src/exec/blocking.rs

//! Synchronous entry points.
//!
//! These drive the async core on a runtime owned by the call, for callers
//! that are not async themselves. They must not be called from inside a Tokio
//! runtime.

use tokio::runtime::{Builder, Runtime};

use crate::errors::Result;
use crate::exec::{captured, streaming};
use crate::operation::LogicalOperation;
use crate::types::{ExecRequest, ExecutionResult};

fn current_thread_runtime() -> Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}

/// Blocking form of [`captured::execute_captured`].
pub fn execute_captured(request: &ExecRequest) -> Result<ExecutionResult> {
    let _op = LogicalOperation::start(format!("executing {}", request.program));
    current_thread_runtime()?.block_on(captured::execute_captured(request))
}

/// Blocking form of [`captured::execute`].
pub fn execute(request: &ExecRequest) -> Result<i32> {
    let _op = LogicalOperation::start(format!("executing {}", request.program));
    current_thread_runtime()?.block_on(captured::execute(request))
}

/// Blocking form of [`streaming::execute_and_read`].
///
/// The pipes keep being read on a background worker thread between calls to
/// `next`, up to the event channel's capacity.
pub fn execute_and_read(
    request: &ExecRequest,
    success_exit_codes: Option<&[i32]>,
) -> Result<BlockingLines> {
    let runtime = Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("procexec-io")
        .enable_all()
        .build()?;

    let lines = {
        let _op = LogicalOperation::start(format!("starting {}", request.program));
        runtime.block_on(streaming::execute_and_read(request, success_exit_codes))?
    };

    Ok(BlockingLines { runtime, lines })
}

/// Iterator over the stdout lines of a running process.
///
/// Yields `Ok(line)` per line, then either ends or yields one
/// `Err(ProcessExecutionFailed)`, after which it ends.
#[derive(Debug)]
pub struct BlockingLines {
    runtime: Runtime,
    lines: streaming::OutputLines,
}

impl BlockingLines {
    pub fn command_line(&self) -> &str {
        self.lines.command_line()
    }
}

impl Iterator for BlockingLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.runtime.block_on(self.lines.next_line()).transpose()
    }
}
