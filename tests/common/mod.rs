// tests/common/mod.rs
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use procexec::ExecRequest;

pub use procexec_test_utils::{init_tracing, sorted_lines, with_timeout};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Path of the `procexec-fixture` binary built alongside the tests.
pub fn fixture() -> &'static str {
    env!("CARGO_BIN_EXE_procexec-fixture")
}

/// A request that runs the fixture with `args`.
pub fn fixture_request(args: &[&str]) -> ExecRequest {
    ExecRequest::new(fixture()).args(args.iter().copied())
}

/// Canonical form of a path, for comparing against what a child reports.
pub fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
