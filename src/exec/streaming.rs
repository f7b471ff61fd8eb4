// src/exec/streaming.rs

//! Streaming execution: hand out stdout lines while the process runs.
//!
//! [`OutputLines`] is a single-pass, forward-only reader. Each call to
//! [`OutputLines::next_line`] waits until either a stdout line or the exit
//! event arrives. Stderr is accumulated in the background and never yielded,
//! but is part of the failure result if the exit code is not accepted.
//!
//! Since the launcher sends the exit event only after both pipes are drained,
//! every queued line is yielded before the exit code is acted on.

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::errors::{ProcExecError, Result};
use crate::exec::launcher::{PreparedCommand, ProcessEvent};
use crate::types::{ExecRequest, OutputBuffers};

/// Exit codes accepted when the caller does not supply any.
pub const DEFAULT_SUCCESS_EXIT_CODES: &[i32] = &[0];

/// Start a program and return a reader over its stdout lines.
///
/// `success_exit_codes` defaults to `[0]`. Echo flags on the request are
/// ignored in this mode. Returns once the process has started; lines are
/// read as the process writes them.
pub async fn execute_and_read(
    request: &ExecRequest,
    success_exit_codes: Option<&[i32]>,
) -> Result<OutputLines> {
    let success_exit_codes = success_exit_codes
        .unwrap_or(DEFAULT_SUCCESS_EXIT_CODES)
        .to_vec();

    let process = PreparedCommand::prepare(request)?.spawn()?;
    let (command_line, events) = process.into_parts();

    Ok(OutputLines {
        command_line,
        events,
        success_exit_codes,
        buffers: OutputBuffers::default(),
        finished: false,
    })
}

/// Live stdout lines of a running process.
#[derive(Debug)]
pub struct OutputLines {
    command_line: String,
    events: mpsc::Receiver<ProcessEvent>,
    success_exit_codes: Vec<i32>,
    buffers: OutputBuffers,
    finished: bool,
}

impl OutputLines {
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Next stdout line, waiting for the process if needed.
    ///
    /// - `Ok(Some(line))` for each line, in the order it was written.
    /// - `Ok(None)` once the process exited with an accepted code and every
    ///   line has been returned.
    /// - `Err(ProcessExecutionFailed)` once, in place of `Ok(None)`, when the
    ///   exit code is not accepted.
    ///
    /// After `Ok(None)` or an error, every further call returns `Ok(None)`.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            match self.events.recv().await {
                Some(ProcessEvent::Stdout(line)) => {
                    self.buffers.push_stdout(&line);
                    return Ok(Some(line));
                }
                Some(ProcessEvent::Stderr(line)) => {
                    self.buffers.push_stderr(&line);
                }
                Some(ProcessEvent::Exited(code)) => {
                    self.finished = true;
                    return self.on_exit(code);
                }
                None => {
                    self.finished = true;
                    return Err(ProcExecError::ChannelClosed);
                }
            }
        }
    }

    /// Drain every remaining line.
    pub async fn collect_lines(mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line().await? {
            lines.push(line);
        }
        Ok(lines)
    }

    fn on_exit(&mut self, code: i32) -> Result<Option<String>> {
        if self.success_exit_codes.contains(&code) {
            debug!(exit_code = code, "streamed process finished");
            return Ok(None);
        }

        error!(
            exit_code = code,
            command_line = %self.command_line,
            "streamed process exited with unexpected code"
        );

        let buffers = std::mem::take(&mut self.buffers);
        let result = buffers.finish(self.command_line.clone(), code);
        Err(ProcExecError::ProcessExecutionFailed(Box::new(result)))
    }
}
