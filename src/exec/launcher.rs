// src/exec/launcher.rs

//! Process launcher.
//!
//! Starts one OS process with stdout and stderr piped and turns everything it
//! does into [`ProcessEvent`]s on a single channel:
//!
//! - one reader task per pipe sends a `Stdout` / `Stderr` event per line;
//! - a supervisor task waits for the process to exit, then waits for **both**
//!   readers to finish, and only then sends `Exited`.
//!
//! So in the channel every line precedes the exit event, and a consumer that
//! receives `Exited` knows no further lines can arrive. Lines of one stream
//! keep their order; lines of different streams may interleave arbitrarily.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{ProcExecError, Result};
use crate::exec::command_line::{combine_arguments, command_line};
use crate::exec::working_dir::resolve_working_dir;
use crate::types::ExecRequest;

/// Capacity of the per-process event channel.
///
/// When the consumer falls behind, the reader tasks stop pulling from the
/// pipes and the child blocks on its next write.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Exit code reported when the OS gives none (killed by a signal) or waiting
/// on the child failed.
pub const UNKNOWN_EXIT_CODE: i32 = -1;

/// Something a running process did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    /// One line written to stdout, without its terminator.
    Stdout(String),
    /// One line written to stderr, without its terminator.
    Stderr(String),
    /// The process exited and both pipes are drained. Always the last event.
    Exited(i32),
}

/// A validated request, ready to spawn.
///
/// Construction performs every check, so a `PreparedCommand` that exists
/// can only fail to spawn because the OS refused.
#[derive(Debug, Clone)]
pub struct PreparedCommand {
    program: String,
    arguments: String,
    working_dir: PathBuf,
    command_line: String,
}

impl PreparedCommand {
    pub fn prepare(request: &ExecRequest) -> Result<Self> {
        let working_dir = resolve_working_dir(request.working_dir.as_deref())?;

        if request.program.is_empty() {
            return Err(ProcExecError::invalid_argument(
                "program",
                "program path must not be empty",
            ));
        }

        Ok(Self {
            program: request.program.clone(),
            arguments: combine_arguments(&request.args),
            working_dir,
            command_line: command_line(&request.program, &request.args),
        })
    }

    /// The command line as launched, for reporting.
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);

        #[cfg(windows)]
        if !self.arguments.is_empty() {
            cmd.raw_arg(&self.arguments);
        }

        #[cfg(not(windows))]
        cmd.args(crate::exec::command_line::split_arguments(&self.arguments));

        cmd.current_dir(&self.working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Start the process.
    ///
    /// The reader and supervisor tasks are spawned onto the current Tokio
    /// runtime. Without one this fails with `NoRuntime` before anything is
    /// started.
    pub fn spawn(self) -> Result<RunningProcess> {
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(ProcExecError::NoRuntime);
        }

        info!(
            program = %self.program,
            command_line = %self.command_line,
            cwd = ?self.working_dir,
            "starting process"
        );

        let mut child = self
            .to_command()
            .spawn()
            .map_err(|source| ProcExecError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let pid = child.id();
        let (tx, rx) = mpsc::channel::<ProcessEvent>(EVENT_CHANNEL_CAPACITY);

        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_line_reader(stdout, tx.clone(), ProcessEvent::Stdout, "stdout"));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_line_reader(stderr, tx.clone(), ProcessEvent::Stderr, "stderr"));
        }

        tokio::spawn(async move {
            let code = match child.wait().await {
                Ok(status) => exit_code(status),
                Err(e) => {
                    warn!(pid, error = %e, "failed waiting for process");
                    UNKNOWN_EXIT_CODE
                }
            };

            for reader in readers {
                if let Err(e) = reader.await {
                    warn!(pid, error = %e, "output reader task failed");
                }
            }

            info!(pid, exit_code = code, "process exited");

            if tx.send(ProcessEvent::Exited(code)).await.is_err() {
                debug!(pid, "exit event dropped; consumer went away");
            }
        });

        Ok(RunningProcess {
            command_line: self.command_line,
            pid,
            events: rx,
        })
    }
}

/// A started process and the receiving end of its event channel.
#[derive(Debug)]
pub struct RunningProcess {
    command_line: String,
    pid: Option<u32>,
    events: mpsc::Receiver<ProcessEvent>,
}

impl RunningProcess {
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Wait for the next event. `None` only if the supervisor task vanished
    /// without reporting an exit.
    pub async fn next_event(&mut self) -> Option<ProcessEvent> {
        self.events.recv().await
    }

    pub(crate) fn into_parts(self) -> (String, mpsc::Receiver<ProcessEvent>) {
        (self.command_line, self.events)
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(UNKNOWN_EXIT_CODE)
}

fn spawn_line_reader<R>(
    pipe: R,
    tx: mpsc::Sender<ProcessEvent>,
    to_event: fn(String) -> ProcessEvent,
    stream: &'static str,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();

        loop {
            match read_line_lossy(&mut reader, &mut buf).await {
                Ok(Some(line)) => {
                    debug!(stream, "{}", line);
                    if tx.send(to_event(line)).await.is_err() {
                        debug!(stream, "consumer went away; closing pipe");
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(stream, error = %e, "error reading process output");
                    break;
                }
            }
        }
    })
}

/// Read one `\n`-terminated line, dropping the terminator and a preceding
/// `\r`. Invalid UTF-8 is replaced rather than rejected. `None` at EOF.
async fn read_line_lossy<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}
