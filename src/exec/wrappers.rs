// src/exec/wrappers.rs

//! Front ends that only rewrite `(program, args)` before delegating.
//!
//! - `*_any`: run through the platform's launcher (`cmd /c` on Windows, `env`
//!   elsewhere), so bare program names are looked up on `PATH` and scripts run.
//! - `*_host`: when a runtime host program is known (for example the current
//!   process itself runs under `dotnet`), run the target through that host.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::Result;
use crate::exec::captured::{execute, execute_captured};
use crate::types::{ExecRequest, ExecutionResult};

#[cfg(windows)]
const SHELL_WRAPPER: (&str, &[&str]) = ("cmd", &["/c"]);

#[cfg(not(windows))]
const SHELL_WRAPPER: (&str, &[&str]) = ("env", &[]);

/// Program and leading arguments used to run "any" program.
pub fn shell_wrapper() -> (&'static str, &'static [&'static str]) {
    SHELL_WRAPPER
}

/// Rewrite a request to go through [`shell_wrapper`].
///
/// A request without a program is left alone so the delegated call rejects
/// it.
pub fn via_shell(request: &ExecRequest) -> ExecRequest {
    if request.program.is_empty() {
        return request.clone();
    }
    let (wrapper, wrapper_args) = shell_wrapper();
    request.clone().wrapped_by(wrapper, wrapper_args)
}

/// Rewrite a request to run under `host`, if there is one.
pub fn via_host(request: &ExecRequest, host: Option<&str>) -> ExecRequest {
    match host {
        Some(host) if !request.program.is_empty() => {
            debug!(host, program = %request.program, "running under host program");
            request.clone().wrapped_by(host, &[])
        }
        _ => request.clone(),
    }
}

pub async fn execute_any(request: &ExecRequest) -> Result<i32> {
    execute(&via_shell(request)).await
}

pub async fn execute_any_captured(request: &ExecRequest) -> Result<ExecutionResult> {
    execute_captured(&via_shell(request)).await
}

pub async fn execute_host(request: &ExecRequest, host: Option<&str>) -> Result<i32> {
    execute(&via_host(request, host)).await
}

pub async fn execute_host_captured(
    request: &ExecRequest,
    host: Option<&str>,
) -> Result<ExecutionResult> {
    execute_captured(&via_host(request, host)).await
}

/// The current executable, if it is one of the `known_hosts` (compared by
/// file stem, ignoring case).
pub fn detect_host_program<S: AsRef<str>>(known_hosts: &[S]) -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    is_host_program(&exe, known_hosts).then_some(exe)
}

fn is_host_program<S: AsRef<str>>(exe: &Path, known_hosts: &[S]) -> bool {
    let Some(stem) = exe.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    known_hosts
        .iter()
        .any(|host| host.as_ref().eq_ignore_ascii_case(stem))
}
