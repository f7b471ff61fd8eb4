// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::types::ExecutionResult;

#[derive(Error, Debug)]
pub enum ProcExecError {
    /// A caller-supplied value was rejected before anything was spawned.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Streaming mode observed an exit code outside the success set.
    ///
    /// The payload is everything captured up to process exit.
    #[error("Process exited with code {}: {}", .0.exit_code, .0.command_line)]
    ProcessExecutionFailed(Box<ExecutionResult>),

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A process was started outside a Tokio runtime.
    #[error("No Tokio runtime is running; use `exec::blocking` from synchronous code")]
    NoRuntime,

    #[error("Process event channel closed before the process exited")]
    ChannelClosed,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProcExecError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// The captured result carried by a `ProcessExecutionFailed` error.
    pub fn result(&self) -> Option<&ExecutionResult> {
        match self {
            Self::ProcessExecutionFailed(result) => Some(result),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcExecError>;
