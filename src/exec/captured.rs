// src/exec/captured.rs

//! Captured execution: run to completion and return everything.

use tracing::debug;

use crate::errors::{ProcExecError, Result};
use crate::exec::launcher::{PreparedCommand, ProcessEvent};
use crate::types::{ExecRequest, ExecutionResult, OutputBuffers};

/// Run a program to completion, capturing stdout, stderr, the interleaved
/// combination of both, and the exit code.
///
/// A non-zero exit code is data, not an error: this only fails when the
/// request is invalid or the program could not be started.
pub async fn execute_captured(request: &ExecRequest) -> Result<ExecutionResult> {
    let prepared = PreparedCommand::prepare(request)?;

    if request.echo_command_line {
        eprintln!("{}", prepared.command_line());
    }

    let mut process = prepared.spawn()?;
    let mut buffers = OutputBuffers::default();

    loop {
        match process.next_event().await {
            Some(ProcessEvent::Stdout(line)) => {
                if request.echo_output {
                    println!("{line}");
                }
                buffers.push_stdout(&line);
            }
            Some(ProcessEvent::Stderr(line)) => {
                if request.echo_output {
                    eprintln!("{line}");
                }
                buffers.push_stderr(&line);
            }
            Some(ProcessEvent::Exited(code)) => {
                debug!(pid = ?process.pid(), exit_code = code, "captured execution finished");
                let (command_line, _) = process.into_parts();
                return Ok(buffers.finish(command_line, code));
            }
            None => return Err(ProcExecError::ChannelClosed),
        }
    }
}

/// Run a program to completion and return only its exit code.
pub async fn execute(request: &ExecRequest) -> Result<i32> {
    Ok(execute_captured(request).await?.exit_code)
}
