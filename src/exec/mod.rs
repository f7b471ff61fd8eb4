// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command_line`] composes the command line from program and arguments.
//! - [`working_dir`] validates the working directory.
//! - [`launcher`] starts the process and turns its output and exit into
//!   `ProcessEvent`s on a channel.
//! - [`captured`] runs to completion and returns an `ExecutionResult`.
//! - [`streaming`] yields stdout lines while the process runs.
//! - [`blocking`] offers the same modes to non-async callers.
//! - [`wrappers`] rewrite requests to run through the shell or a host program.

pub mod blocking;
pub mod captured;
pub mod command_line;
pub mod launcher;
pub mod streaming;
pub mod working_dir;
pub mod wrappers;

pub use captured::{execute, execute_captured};
pub use launcher::{PreparedCommand, ProcessEvent, RunningProcess};
pub use streaming::{execute_and_read, OutputLines, DEFAULT_SUCCESS_EXIT_CODES};
pub use wrappers::{
    detect_host_program, execute_any, execute_any_captured, execute_host,
    execute_host_captured, via_host, via_shell,
};
