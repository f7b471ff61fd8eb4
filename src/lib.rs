// src/lib.rs

//! Run a subprocess and deal with its output.
//!
//! Two modes over one launcher:
//!
//! - **captured**: [`exec::execute_captured`] runs to completion and returns
//!   an [`ExecutionResult`] with stdout, stderr, both interleaved, and the
//!   exit code. A non-zero exit code is not an error.
//! - **streaming**: [`exec::execute_and_read`] returns [`exec::OutputLines`],
//!   which yields stdout lines while the process runs and fails with
//!   `ProcessExecutionFailed` if the exit code is not accepted.
//!
//! [`exec::blocking`] has the same modes for synchronous callers.

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod operation;
pub mod types;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command, RunArgs, StreamArgs, TargetArgs};
use crate::config::{load_or_default, ConfigFile};
use crate::errors::ProcExecError;
use crate::exec::command_line::command_line;
use crate::exec::{execute_and_read, execute_captured, via_host, via_shell};

pub use crate::errors::Result as ProcExecResult;
pub use crate::types::{ExecRequest, ExecutionResult};

/// High-level entry point used by `main.rs`.
///
/// Returns the exit code `procexec` itself should exit with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let cfg = load_or_default(args.config.as_deref()).context("loading configuration")?;

    match args.command {
        Command::Run(run) => run_captured(&cfg, run).await,
        Command::Stream(stream) => run_streaming(&cfg, stream).await,
        Command::Compose(target) => {
            let req = target_request(&target);
            println!("{}", command_line(&req.program, &req.args));
            Ok(0)
        }
    }
}

fn target_request(target: &TargetArgs) -> ExecRequest {
    let mut req = ExecRequest::new(target.program.clone()).args(target.args.iter().cloned());
    if let Some(cwd) = &target.cwd {
        req = req.working_dir(cwd);
    }
    if target.any {
        req = via_shell(&req);
    }
    req
}

async fn run_captured(cfg: &ConfigFile, args: RunArgs) -> Result<i32> {
    let mut req = target_request(&args.target)
        .echo_command_line(args.echo_command_line || cfg.defaults.echo_command_line)
        .echo_output(args.echo_output || cfg.defaults.echo_output);

    if args.host {
        req = via_host(&req, cfg.host.resolve().as_deref());
    }

    let result = execute_captured(&req)
        .await
        .with_context(|| format!("running '{}'", args.target.program))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !req.echo_output {
        print!("{}", result.standard_output);
        eprint!("{}", result.error_output);
    }

    info!(
        command_line = %result.command_line,
        exit_code = result.exit_code,
        "run finished"
    );
    Ok(result.exit_code)
}

async fn run_streaming(cfg: &ConfigFile, args: StreamArgs) -> Result<i32> {
    let req = target_request(&args.target);
    let success_codes = if args.success_codes.is_empty() {
        cfg.defaults.success_exit_codes.clone()
    } else {
        args.success_codes
    };

    let mut lines = execute_and_read(&req, Some(&success_codes))
        .await
        .with_context(|| format!("starting '{}'", args.target.program))?;

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => println!("{line}"),
            Ok(None) => {
                debug!(command_line = %lines.command_line(), "stream finished");
                return Ok(0);
            }
            Err(ProcExecError::ProcessExecutionFailed(result)) => {
                eprint!("{}", result.error_output);
                eprintln!(
                    "procexec: '{}' exited with code {}",
                    result.command_line, result.exit_code
                );
                // A rejected 0 must still fail the caller.
                return Ok(if result.exit_code == 0 { 1 } else { result.exit_code });
            }
            Err(e) => return Err(e.into()),
        }
    }
}
