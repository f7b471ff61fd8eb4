// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `procexec`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "procexec",
    version,
    about = "Run a program and capture or stream its output.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Procexec.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PROCEXEC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run to completion and report the captured output.
    Run(RunArgs),

    /// Print stdout lines as they arrive; fail on an unexpected exit code.
    Stream(StreamArgs),

    /// Print the command line that would be launched, without running it.
    Compose(TargetArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Echo the command line to stderr before starting.
    #[arg(long)]
    pub echo_command_line: bool,

    /// Echo output lines as they arrive instead of printing them at the end.
    #[arg(long)]
    pub echo_output: bool,

    /// Print the full result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Run through the runtime host program, if one is configured or detected.
    #[arg(long, conflicts_with = "any")]
    pub host: bool,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Debug, Clone, Args)]
pub struct StreamArgs {
    /// Exit code to treat as success (repeatable). Default: `[defaults]` or 0.
    #[arg(long = "success-code", value_name = "CODE", allow_negative_numbers = true)]
    pub success_codes: Vec<i32>,

    #[command(flatten)]
    pub target: TargetArgs,
}

/// What to run and where.
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Absolute path of the working directory. Default: current directory.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Run through `cmd /c` (Windows) or `env` so the program is found on PATH.
    #[arg(long)]
    pub any: bool,

    /// Program to run.
    #[arg(value_name = "PROGRAM")]
    pub program: String,

    /// Arguments passed to the program.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
